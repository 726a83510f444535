//! Static region reference data.
//!
//! Source files number the 25 administrative regions alphabetically
//! (`1` = Вінницька … `25` = Республіка Крим). A second table maps that
//! numbering onto the canonical administrative scheme.

/// Raw source region code to display name.
pub static REGION_NAMES: &[(i32, &str)] = &[
    (1, "Вінницька"),
    (2, "Волинська"),
    (3, "Дніпропетровська"),
    (4, "Донецька"),
    (5, "Житомирська"),
    (6, "Закарпатська"),
    (7, "Запорізька"),
    (8, "Івано-Франківська"),
    (9, "Київська"),
    (10, "Кіровоградська"),
    (11, "Луганська"),
    (12, "Львівська"),
    (13, "Миколаївська"),
    (14, "Одеська"),
    (15, "Полтавська"),
    (16, "Рівненська"),
    (17, "Сумська"),
    (18, "Тернопільська"),
    (19, "Харківська"),
    (20, "Херсонська"),
    (21, "Хмельницька"),
    (22, "Черкаська"),
    (23, "Чернівецька"),
    (24, "Чернігівська"),
    (25, "Республіка Крим"),
];

/// Raw source region code to canonical administrative code.
///
/// Kept as reference data only: the dataset and the views are keyed by the
/// raw source code.
pub static CANONICAL_CODES: &[(i32, i32)] = &[
    (1, 13),
    (2, 14),
    (3, 15),
    (4, 16),
    (5, 17),
    (6, 18),
    (7, 19),
    (8, 20),
    (9, 21),
    (10, 22),
    (11, 23),
    (12, 24),
    (13, 1),
    (14, 2),
    (15, 3),
    (16, 4),
    (17, 5),
    (18, 6),
    (19, 7),
    (20, 8),
    (21, 9),
    (22, 10),
    (23, 11),
    (24, 12),
    (25, 25),
];

/// Looks up the display name for a raw source region code.
pub fn region_name(code: i32) -> Option<&'static str> {
    REGION_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Reverse lookup: display name to raw source region code.
pub fn region_code(name: &str) -> Option<i32> {
    REGION_NAMES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

/// Translates a raw source code into the canonical administrative code.
pub fn canonical_code(code: i32) -> Option<i32> {
    CANONICAL_CODES
        .iter()
        .find(|(raw, _)| *raw == code)
        .map(|(_, canonical)| *canonical)
}
