// Lenient decoders for smallfile's JSON output
//
// smallfile emits some numeric and boolean fields as strings ("0.0",
// "False", "0") depending on how they were set. These accept either form.

use serde::de::{Deserializer, Error};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(v) => Ok(v as f64),
        Scalar::Float(v) => Ok(v),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", s))),
        Scalar::Bool(b) => Err(D::Error::custom(format!("expected a number, got {}", b))),
    }
}

pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(v) => Ok(v),
        Scalar::Float(v) if v.fract() == 0.0 => Ok(v as i64),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{}'", s))),
        Scalar::Float(v) => Err(D::Error::custom(format!("expected an integer, got {}", v))),
        Scalar::Bool(b) => Err(D::Error::custom(format!("expected an integer, got {}", b))),
    }
}

pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => Ok(b),
        Scalar::Int(v) => Ok(v != 0),
        Scalar::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "y" | "yes" | "1" => Ok(true),
            "false" | "n" | "no" | "0" | "" => Ok(false),
            _ => Err(D::Error::custom(format!("expected a boolean, got '{}'", s))),
        },
        Scalar::Float(v) => Err(D::Error::custom(format!("expected a boolean, got {}", v))),
    }
}

/// Flag-style fields ("Y"/"N") kept as text
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => if b { "True" } else { "False" }.to_string(),
        Scalar::Int(v) => v.to_string(),
        Scalar::Float(v) => v.to_string(),
        Scalar::Str(s) => s,
    })
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "text")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(s)| s))
}
