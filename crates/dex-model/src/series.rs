//! Static expansion id tables, one per playable series.
//!
//! These ids are baked into every identifier ever issued and never change;
//! the catalog of expansion definitions is loaded separately.

use crate::enums::ExpansionSeries;

pub const PTCGO_NO_SET: u8 = 0;
pub const PTCGO_TREASURE_CHEST: u8 = 1;
pub const PTCGO_AVATAR_COLLECTION_BOX: u8 = 2;
pub const XY_KSS: u8 = 30;
pub const SM_PROMO: u8 = 60;

const HGSS: &[(&str, u8)] = &[
    ("HS", 1),
    ("UL", 2),
    ("UD", 3),
    ("TM", 4),
    ("CL", 5),
    ("HSEnergy", 54),
    ("PR-HS", 60),
];

const BW: &[(&str, u8)] = &[
    ("BLW", 1),
    ("EPO", 2),
    ("NVI", 3),
    ("NXD", 4),
    ("DEX", 5),
    ("DRX", 6),
    ("DRV", 7),
    ("BCR", 8),
    ("PLS", 9),
    ("PLF", 10),
    ("PLB", 11),
    ("LTR", 12),
    ("TK-Zoroark", 40),
    ("TK-Excadrill", 41),
    ("BLWEnergy", 54),
    ("MCD1", 55),
    ("MCD2", 56),
    ("MCD3", 57),
    ("PR-BLW", 60),
];

const XY: &[(&str, u8)] = &[
    ("XY", 1),
    ("FLF", 2),
    ("FFI", 3),
    ("PHF", 4),
    ("PRC", 5),
    ("DCR", 6),
    ("ROS", 7),
    ("AOR", 8),
    ("BKT", 9),
    ("BKP", 10),
    ("GEN", 11),
    ("FCO", 12),
    ("STS", 13),
    ("EVO", 14),
    ("KSS", XY_KSS),
    ("TK-Noibat", 40),
    ("TK-Sylveon", 41),
    ("TK-Bisharp", 42),
    ("TK-Wigglytuff", 43),
    ("TK-Latios", 44),
    ("TK-Latias", 45),
    ("TK-PikachuLibre", 46),
    ("TK-Suicune", 47),
    ("XYEnergy", 54),
    ("MCD4", 55),
    ("MCD5", 56),
    ("MCD6", 57),
    ("PR-XY", 60),
    // Online-only promos.
    ("RSP", 61),
];

const SM: &[(&str, u8)] = &[
    ("SUM", 1),
    ("GRI", 2),
    ("BUS", 3),
    ("SLG", 4),
    ("CIN", 5),
    ("UPR", 6),
    ("FLI", 7),
    ("CES", 8),
    ("DRM", 9),
    ("LOT", 10),
    ("TEU", 11),
    ("DET", 12),
    ("UNB", 13),
    ("UNM", 14),
    ("HIF", 15),
    ("CEC", 16),
    ("TK-Lycanroc", 40),
    ("TK-AlolanRaichu", 41),
    ("SMEnergy", 54),
    ("MCD7", 55),
    ("MCD8", 56),
    ("PR-SM", SM_PROMO),
];

const SWSH: &[(&str, u8)] = &[("SSH", 1), ("RCL", 2), ("SWSHEnergy", 54), ("PR-SW", 60)];

const PTCGO: &[(&str, u8)] = &[
    ("NoSet", PTCGO_NO_SET),
    ("TreasureChest", PTCGO_TREASURE_CHEST),
    ("AvatarCollectionBox", PTCGO_AVATAR_COLLECTION_BOX),
];

/// Expansion table of a series, if the series has items in the online game.
pub fn table(series: ExpansionSeries) -> Option<&'static [(&'static str, u8)]> {
    match series {
        ExpansionSeries::Hgss => Some(HGSS),
        ExpansionSeries::Bw => Some(BW),
        ExpansionSeries::Xy => Some(XY),
        ExpansionSeries::Sm => Some(SM),
        ExpansionSeries::Swsh => Some(SWSH),
        ExpansionSeries::Ptcgo => Some(PTCGO),
        _ => None,
    }
}

/// Expansion code for a raw (series, expansion id) pair.
pub fn expansion_code(series: u8, expansion: u8) -> Option<&'static str> {
    let series = ExpansionSeries::try_from(series).ok()?;
    table(series)?
        .iter()
        .find(|(_, id)| *id == expansion)
        .map(|(code, _)| *code)
}

/// Expansion id of an exact expansion code within a series.
pub fn expansion_id(series: ExpansionSeries, code: &str) -> Option<u8> {
    table(series)?
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, id)| *id)
}
