//! Header and field-name normalization shared by imports and field ordering

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Column order of the attributes import sheet
pub const ATTR_IMPORT_ORDER: &[&str] = &[
    "LAYUP", "STDUNK", "DUNK", "CLOSE", "MID", "3PT", "FT", "PHOOK", "PFADE", "POSTC", "FOUL",
    "SHOTIQ", "BALL", "SPD/BALL", "HANDS", "PASS", "PASS_IQ", "VISION", "OCNST", "ID", "PD",
    "STEAL", "BLOCK", "OREB", "DREB", "HELPIQ", "PSPER", "DCNST", "SPEED", "AGIL", "STR", "VERT",
    "STAM", "INTNGBL", "HSTL", "DUR", "POT",
];

/// Column order of the durability import sheet
pub const DUR_IMPORT_ORDER: &[&str] = &[
    "Back",
    "Head",
    "Left Ankle",
    "Left Elbow",
    "Left Foot",
    "Left Hip",
    "Left Knee",
    "Left Shoulder",
    "Neck",
    "Right Ankle",
    "Right Elbow",
    "Right Foot",
    "Right Hip",
    "Right Knee",
    "Right Shoulder",
    "miscellaneous",
];

/// Column order of the tendencies import sheet
pub const TEND_IMPORT_ORDER: &[&str] = &[
    "T/SHOT", "T/TOUCH", "T/SCLOSE", "T/SUNDER", "T/SCL", "T/SCM", "T/SCR", "T/SMID", "T/SUSMID",
    "T/OSSMID", "T/SML", "T/SMLC", "T/SMC", "T/SMRC", "T/SMR", "T/S3PT", "T/SUS3PT", "T/OSS3PT",
    "T/S3L", "T/S3LC", "T/S3C", "T/S3RC", "T/S3R", "T/CONTMID", "T/CONT3PT", "T/SBMID", "T/SB3PT",
    "T/SPINJ", "T/TPU3PT", "T/DPUMID", "T/DPU3PT", "T/DRIVE", "T/SUDRIVE", "T/OSDRIVE", "T/GLASS",
    "T/STHRU", "T/DRLAYUP", "T/SPLAYUP", "T/EURO", "T/HOPSTEP", "T/FLOATER", "T/SDUNK", "T/DDUNK",
    "T/FDUNK", "T/AOOP", "T/PUTBACK", "T/CRASH", "T/DRIVE-R", "T/TTPFAKE", "T/JABSTEP",
    "T/TTIDLE", "T/TTSHOOT", "T/SIZEUP", "T/HSTTN", "T/NOSETUP", "T/XOVER", "T/2XOVER", "T/SPIN",
    "T/HSPIN", "T/SBACK", "T/BBACK", "T/DHSTTN", "T/INNOUT", "T/NODRIB", "T/FINISH", "T/DISH",
    "T/FLASHYP", "T/A-OOPP", "T/ROLLPOP", "T/SPOTCUT", "T/ISOVSE", "T/ISOVSG", "T/ISOVSA",
    "T/ISOVSP", "T/PLYDISC", "T/POSTUP", "T/PBDOWN", "T/PAGGBD", "T/PFACEUP", "T/PSPIN",
    "T/PDRIVE", "T/PDSTEP", "T/PHSTEP", "T/PSHOOT", "T/PHOOKL", "T/PHOOKR", "T/PFADEL", "T/PFADER",
    "T/PSHIMMY", "T/PHSHOT", "T/PSBSHOT", "T/PUPNUND", "T/TAKEC", "T/FOUL", "T/HFOUL",
    "T/PINTERC", "T/STEAL", "T/BLOCK", "T/CONTEST",
];

const HEADER_SYNONYMS: &[(&str, &str)] = &[
    // attributes
    ("LAYUP", "DRIVINGLAYUP"),
    ("STDUNK", "STANDINGDUNK"),
    ("DUNK", "DRIVINGDUNK"),
    ("CLOSE", "CLOSESHOT"),
    ("MID", "MIDRANGESHOT"),
    ("3PT", "3PTSHOT"),
    ("FT", "FREETHROW"),
    ("PHOOK", "POSTHOOK"),
    ("PFADE", "POSTFADE"),
    ("POSTC", "POSTMOVES"),
    ("FOUL", "DRAWFOUL"),
    ("BALL", "BALLCONTROL"),
    ("SPDBALL", "SPEEDWITHBALL"),
    ("PASSIQ", "PASSINGIQ"),
    ("VISION", "PASSINGVISION"),
    ("OCNST", "OFFENSIVECONSISTENCY"),
    ("ID", "INTERIORDEFENSE"),
    ("PD", "PERIMETERDEFENSE"),
    ("OREB", "OFFENSIVEREBOUND"),
    ("DREB", "DEFENSIVEREBOUND"),
    ("HELPIQ", "HELPDEFENSEIQ"),
    ("PSPER", "PASSINGPERCEPTION"),
    ("DCNST", "DEFENSIVECONSISTENCY"),
    ("AGIL", "AGILITY"),
    ("STR", "STRENGTH"),
    ("VERT", "VERTICAL"),
    ("STAM", "STAMINA"),
    ("INTNGBL", "INTANGIBLES"),
    ("HSTL", "HUSTLE"),
    ("DUR", "MISCELLANEOUSDURABILITY"),
    ("POT", "POTENTIAL"),
    // durability
    ("BACK", "BACKDURABILITY"),
    ("HEAD", "HEADDURABILITY"),
    ("LEFTANKLE", "LEFTANKLEDURABILITY"),
    ("LEFTELBOW", "LEFTELBOWDURABILITY"),
    ("LEFTFOOT", "LEFTFOOTDURABILITY"),
    ("LEFTHIP", "LEFTHIPDURABILITY"),
    ("LEFTKNEE", "LEFTKNEEDURABILITY"),
    ("LEFTSHOULDER", "LEFTSHOULDERDURABILITY"),
    ("NECK", "NECKDURABILITY"),
    ("RIGHTANKLE", "RIGHTANKLEDURABILITY"),
    ("RIGHTELBOW", "RIGHTELBOWDURABILITY"),
    ("RIGHTFOOT", "RIGHTFOOTDURABILITY"),
    ("RIGHTHIP", "RIGHTHIPDURABILITY"),
    ("RIGHTKNEE", "RIGHTKNEEDURABILITY"),
    ("RIGHTSHOULDER", "RIGHTSHOULDERDURABILITY"),
    ("MISCELLANEOUS", "MISCELLANEOUSDURABILITY"),
    // tendencies: shooting
    ("TSHOT", "SHOOT"),
    ("TTOUCH", "TOUCHES"),
    ("TSCLOSE", "SHOTCLOSE"),
    ("TSUNDER", "SHOTUNDERBASKET"),
    ("TSCL", "SHOTCLOSELEFT"),
    ("TSCM", "SHOTCLOSEMIDDLE"),
    ("TSCR", "SHOTCLOSERIGHT"),
    ("TSMID", "SHOTMID"),
    ("TSUSMID", "SPOTUPSHOTMID"),
    ("TOSSMID", "OFFSCREENSHOTMID"),
    ("TSML", "SHOTMIDLEFT"),
    ("TSMLC", "SHOTMIDLEFTCENTER"),
    ("TSMC", "SHOTMIDCENTER"),
    ("TSMRC", "SHOTMIDRIGHTCENTER"),
    ("TSMR", "SHOTMIDRIGHT"),
    ("TS3PT", "SHOT3PT"),
    ("TSUS3PT", "SPOTUPSHOT3PT"),
    ("TOSS3PT", "OFFSCREENSHOT3PT"),
    ("TS3L", "SHOT3PTLEFT"),
    ("TS3LC", "SHOT3PTLEFTCENTER"),
    ("TS3C", "SHOT3PTCENTER"),
    ("TS3RC", "SHOT3PTRIGHTCENTER"),
    ("TS3R", "SHOT3PTRIGHT"),
    ("TCONTMID", "CONTESTEDJUMPERMID"),
    ("TCONT3PT", "CONTESTEDJUMPER3PT"),
    ("TSBMID", "STEPBACKJUMPERMID"),
    ("TSB3PT", "STEPBACKJUMPER3PT"),
    ("TSPINJ", "SPINJUMPERTENDENCY"),
    ("TTPU3PT", "TRANSITIONPULLUP3PT"),
    ("TDPUMID", "DRIVEPULLUPMID"),
    ("TDPU3PT", "DRIVEPULLUP3PT"),
    // tendencies: driving and finishing
    ("TDRIVE", "DRIVE"),
    ("TSUDRIVE", "SPOTUPDRIVE"),
    ("TOSDRIVE", "OFFSCREENDRIVE"),
    ("TGLASS", "USEGLASS"),
    ("TSTHRU", "STEPTHROUGHSHOT"),
    ("TDRLAYUP", "DRIVINGLAYUPTENDENCY"),
    ("TSPLAYUP", "STANDINGLAYUPTENDENCY"),
    ("TEURO", "EUROSTEP"),
    ("THOPSTEP", "HOPSTEP"),
    ("TFLOATER", "FLOATER"),
    ("TSDUNK", "STANDINGDUNKTENDENCY"),
    ("TDDUNK", "DRIVINGDUNKTENDENCY"),
    ("TFDUNK", "FLASHYDUNKTENDENCY"),
    ("TAOOP", "ALLEYOOP"),
    ("TPUTBACK", "PUTBACK"),
    ("TCRASH", "CRASH"),
    ("TDRIVER", "DRIVERIGHT"),
    ("TTTPFAKE", "TRIPLETHREATPUMPFAKE"),
    ("TJABSTEP", "TRIPLETHREATJABSTEP"),
    ("TTTIDLE", "TRIPLETHREATIDLE"),
    ("TTTSHOOT", "TRIPLETHREATSHOOT"),
    ("TSIZEUP", "SETUPWITHSIZEUP"),
    ("THSTTN", "SETUPWITHHESITATION"),
    ("TNOSETUP", "NOSETUPDRIBBLE"),
    ("TXOVER", "DRIVINGCROSSOVER"),
    ("T2XOVER", "DRIVINGDOUBLECROSSOVER"),
    ("TSPIN", "DRIVINGSPIN"),
    ("THSPIN", "DRIVINGHALFSPIN"),
    ("TSBACK", "DRIVINGSTEPBACK"),
    ("TBBACK", "DRIVINGBEHINDBACK"),
    ("TDHSTTN", "DRIVINGDRIBBLEHESITATION"),
    ("TINNOUT", "INANDOUT"),
    ("TNODRIB", "NODRIBBLE"),
    ("TFINISH", "ATTACKSTRONGONDRIVE"),
    // tendencies: passing and isolation
    ("TDISH", "DISHTOOPENMAN"),
    ("TFLASHYP", "FLASHYPASS"),
    ("TAOOPP", "ALLEYOOPPASS"),
    ("TROLLPOP", "ROLLVSPOP"),
    ("TSPOTCUT", "SPOTUPCUT"),
    ("TISOVSE", "ISOVSE"),
    ("TISOVSG", "ISOVSG"),
    ("TISOVSA", "ISOVSA"),
    ("TISOVSP", "ISOVSP"),
    ("TPLYDISC", "PLAYDISCIPLINE"),
    // tendencies: post
    ("TPOSTUP", "POSTUP"),
    ("TPBDOWN", "POSTBACKDOWN"),
    ("TPAGGBD", "POSTAGGRESSIVEBACKDOWN"),
    ("TPFACEUP", "POSTFACEUP"),
    ("TPSPIN", "POSTSPIN"),
    ("TPDRIVE", "POSTDRIVE"),
    ("TPDSTEP", "POSTDROPSTEP"),
    ("TPHSTEP", "POSTHOPSTEP"),
    ("TPSHOOT", "POSTSHOT"),
    ("TPHOOKL", "POSTHOOKLEFT"),
    ("TPHOOKR", "POSTHOOKRIGHT"),
    ("TPFADEL", "POSTFADELEFT"),
    ("TPFADER", "POSTFADERIGHT"),
    ("TPSHIMMY", "POSTSHIMMY"),
    ("TPHSHOT", "POSTHOPSHOT"),
    ("TPSBSHOT", "POSTSTEPBACKSHOT"),
    ("TPUPNUND", "POSTUPANDUNDER"),
    // tendencies: defense
    ("TTAKEC", "TAKECHARGE"),
    ("TFOUL", "FOUL"),
    ("THFOUL", "HARDFOUL"),
    ("TPINTERC", "PASSINTERCEPTION"),
    ("TSTEAL", "STEAL"),
    ("TBLOCK", "BLOCK"),
    ("TCONTEST", "CONTEST"),
];

lazy_static! {
    static ref SYNONYMS: HashMap<&'static str, &'static str> =
        HEADER_SYNONYMS.iter().copied().collect();
}

/// Uppercase ASCII alphanumerics only
pub fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Normalizes an import header and maps known abbreviations to field names
pub fn normalize_header(header: &str) -> String {
    let norm = normalize_field_name(header);
    match SYNONYMS.get(norm.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => norm,
    }
}

/// Equal, or either contains the other. Empty names never match.
pub fn names_match(norm_header: &str, norm_field: &str) -> bool {
    if norm_header.is_empty() || norm_field.is_empty() {
        return false;
    }
    norm_header == norm_field || norm_field.contains(norm_header) || norm_header.contains(norm_field)
}

/// Keeps digits, `.` and `-`, then parses; `None` when nothing numeric remains
pub fn parse_cell(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
