// Field Alias Tables - canonical field name <-> smallfile external name
//
// Consulted by the parameter adapter (YAML keys) and the result normalizer
// (CSV column headers). Names missing from a table are used verbatim.

/// SmallfileParams field -> smallfile YAML key
pub const PARAM_ALIASES: &[(&str, &str)] = &[
    ("file_size", "file-size"),
    ("files_per_dir", "files-per-dir"),
    ("dirs_per_dir", "dirs-per-dir"),
    ("record_size", "record-size"),
    ("file_size_distribution", "file-size-distribution"),
    ("xattr_size", "xattr-size"),
    ("xattr_count", "xattr-count"),
    ("hash_into_dirs", "hash-into-dirs"),
    ("same_dir", "same-dir"),
    ("verify_read", "verify-read"),
    ("cleanup_delay_usec_per_file", "cleanup-delay-usec-per-file"),
    ("permute_host_dirs", "permute-host-dirs"),
    ("host_set", "host-set"),
];

/// SmallfileParams fields smallfile expects as "Y"/"N" strings
pub const FLAG_PARAMS: &[&str] = &[
    "stonewall",
    "finish",
    "hash_into_dirs",
    "same_dir",
    "fsync",
    "verify_read",
    "incompressible",
    "permute_host_dirs",
];

/// ResponseTimeSample field -> stats-rsptimes.csv column header
pub const RSPTIME_COLUMNS: &[(&str, &str)] = &[
    ("host_thread", "host:thread"),
    ("samples", " samples"),
    ("min", " min"),
    ("max", " max"),
    ("mean", " mean"),
    ("pctdev", " %dev"),
    ("pctile50", " 50%ile"),
    ("pctile90", " 90%ile"),
    ("pctile95", " 95%ile"),
    ("pctile99", " 99%ile"),
];

fn forward<'a>(table: &[(&'static str, &'static str)], name: &'a str) -> &'a str {
    table
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(_, external)| *external)
        .unwrap_or(name)
}

fn backward<'a>(table: &[(&'static str, &'static str)], name: &'a str) -> &'a str {
    table
        .iter()
        .find(|(_, external)| *external == name)
        .map(|(canonical, _)| *canonical)
        .unwrap_or(name)
}

/// YAML key smallfile expects for a SmallfileParams field
pub fn param_external_name(field: &str) -> &str {
    forward(PARAM_ALIASES, field)
}

/// SmallfileParams field for a smallfile YAML key
pub fn param_canonical_name(key: &str) -> &str {
    backward(PARAM_ALIASES, key)
}

pub fn is_flag_param(field: &str) -> bool {
    FLAG_PARAMS.contains(&field)
}

/// CSV column header carrying a ResponseTimeSample field
pub fn rsptime_column(field: &str) -> &str {
    forward(RSPTIME_COLUMNS, field)
}
