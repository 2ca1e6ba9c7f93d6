//! Capture fixtures for integration tests.
//!
//! Builds capture lines in the textual form written by the serial terminal,
//! plus one real point-cloud frame recorded from the sensor.

#![allow(dead_code)]

/// Point-cloud header: magic, frame counter, (unused), TLV1, payload length.
pub const POINT_HEADER: &str =
    "01 02 03 04 05 06 07 08 5F 02 00 00 38 00 00 00 01 00 00 00 3F 02 00 00";

/// Auxiliary `v, SNR, POW, DPK` bytes appended to synthetic points.
pub const POINT_AUX: &str = "FA 3B 44 01 41 00 00 7F 43 98 55 0A 41";

/// Debug3 person header announcing two persons (`NumPeople` = 0x40).
pub const PERSON_HEADER: &str = "01 02 03 04 05 06 07 08 70 00 00 00 5F 02 00 00 \
                                 01 00 00 00 00 00 00 00 02 00 00 00 40 00 00 00";

/// Real capture: 23 points then the TLV2 sentinel.
pub const RECORDED_LINE: &str = "[11:27:18.234]IN\u{a1}\u{fb}\u{a1}\u{f4}\
    01 02 03 04 05 06 07 08 5F 02 00 00 38 00 00 00 01 00 00 00 3F 02 00 00 \
    01 44 C1 3E 01 8F AC BF 8C 21 81 3F FA 3B 44 01 41 00 00 7F 43 98 55 0A 41 \
    01 E0 DC 3E 01 5D BA BF 29 D0 51 3F FB 8F 5B A9 40 00 00 7F 43 29 01 CB 40 \
    01 80 C7 3E 01 90 AE BF D6 ED 89 3F F9 F4 A0 07 41 00 00 7F 43 A1 56 E0 40 \
    01 80 C7 3E 01 B0 B5 BF FB 65 80 3F FA B0 5C DD 41 00 00 7F 43 E7 E1 02 41 \
    01 C0 D5 3E 01 B0 B5 BF 01 EA 7D 3F FB A6 25 97 41 00 00 7F 43 0A 5B 06 41 \
    01 BC CD 3E 81 04 B4 BF 44 3D 8E 3F F9 AE 86 5A 41 00 00 7F 43 48 AC FA 40 \
    01 6E DC 3E 01 58 B0 BF 06 6E 91 3F FA F2 BA 2B 42 00 00 7F 43 72 C6 FA 40 \
    01 6E DC 3E 01 B1 B7 BF E9 07 88 3F FB 90 68 EF 41 00 00 7F 43 21 AE F4 40 \
    01 40 F2 3E 01 E7 B1 BF B0 DD 98 3F F9 FB C8 51 41 00 00 7F 43 EC 13 F0 40 \
    01 1C E3 3E 01 B0 B5 BF 35 D6 95 3F FA D4 9C 17 42 00 00 7F 43 04 7A F6 40 \
    01 F8 D3 3E 01 B0 B5 BF 86 37 97 3F FB 6A 65 CC 41 00 00 7F 43 E0 B0 E9 40 \
    01 60 F9 3E 01 08 BB BF DC B5 98 3F F9 88 C5 DC 40 00 00 7F 43 E3 7E E7 40 \
    01 CA E9 3E 81 22 B7 BF B8 D9 9E 3F FA 45 AD 94 41 00 00 7F 43 B9 75 E4 40 \
    01 CA E9 3E 81 22 B7 BF B8 D9 9E 3F FB 66 A7 41 41 00 00 7F 43 C7 78 CE 40 \
    01 48 10 3F 01 5E BC BF B5 72 9E 3F FB 6A 99 B4 40 00 00 7F 43 35 0F C3 40 \
    01 48 10 3F 02 60 C0 BF AB 8E 99 3F FC 1E F0 00 41 00 00 7F 43 A8 1E D5 40 \
    01 4A 14 3F 01 3E B5 BF D3 7F B0 3F FB 4A B1 DB 40 00 00 7F 43 CF E7 EF 40 \
    01 87 1C 3F 01 7B BD BF B6 BD A5 3F FC B1 A2 28 41 00 00 7F 43 B1 0F E6 40 \
    01 C2 20 3F 02 4B CF BF 74 83 9A 3F FB 92 69 A1 40 00 00 00 00 24 9A E1 40 \
    01 4C 18 3F 01 24 BA BF 02 45 B5 3F FC 24 76 0B 41 00 00 7F 43 2B 8A D8 40 \
    01 A0 15 BE 02 70 E0 BF B6 0C C5 3F 03 DE 6A 58 40 00 00 7F 43 C6 50 EB 40 \
    01 30 99 BD 81 FE E0 BF CC BA CF 3F 03 44 4E 76 40 00 00 7F 43 51 A2 FC 40 \
    02 6C D8 3F 01 46 0C C0 14 7D 39 40 00 B4 08 5E 40 00 00 00 00 51 EF 32 41 \
    02 00 00 00 00 00 00 00";

/// Points in the recorded frame.
pub const RECORDED_POINTS: usize = 23;

/// Space-separated little-endian bytes of an f32.
pub fn f32_hex(value: f32) -> String {
    value
        .to_le_bytes()
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One 25-byte point record.
pub fn point(x: f32, y: f32, z: f32) -> String {
    format!("{} {} {} {}", f32_hex(x), f32_hex(y), f32_hex(z), POINT_AUX)
}

/// A point-cloud line with the given points and an optional trailing sentinel.
pub fn point_line(time: &str, points: &[[f32; 3]], terminated: bool) -> String {
    let mut parts = vec![POINT_HEADER.to_string()];
    parts.extend(points.iter().map(|[x, y, z]| point(*x, *y, *z)));
    if terminated {
        parts.push("02 00 00 00 00 00 00 00".to_string());
    }
    format!("[{}]{}", time, parts.join(" "))
}

/// One 32-byte person record; `id_bits` is the bit-pattern block, e.g. `"00 00 00 01"`.
pub fn person(id_bits: &str, position: [f32; 3], velocity: [f32; 3]) -> String {
    let mut parts = vec![id_bits.to_string(), f32_hex(1.0)];
    parts.extend(position.iter().map(|v| f32_hex(*v)));
    parts.extend(velocity.iter().map(|v| f32_hex(*v)));
    parts.join(" ")
}

/// A Debug3 person-tracking line.
pub fn person_line(time: &str, persons: &[String]) -> String {
    let mut parts = vec![PERSON_HEADER.to_string()];
    parts.extend(persons.iter().cloned());
    format!("[{}]{}", time, parts.join(" "))
}

/// A Debug2 person-tracking line: noise, then the TLV2 sentinel and persons.
pub fn debug2_person_line(time: &str, persons: &[String]) -> String {
    let mut parts = vec!["AA 55 03 04".to_string(), "02 00 00 00".to_string()];
    parts.push(format!("{:02X} 00 00 00", persons.len() * 32));
    parts.extend(persons.iter().cloned());
    format!("[{}]{}", time, parts.join(" "))
}
