use crate::domain::Fix;
use serde::Deserialize;

// Protocol: https://gpsd.gitlab.io/gpsd/gpsd_json.html
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "class")]
pub enum Report {
    #[serde(rename = "TPV")]
    Tpv(Tpv),
    #[serde(rename = "VERSION")]
    Version(Version),
    #[serde(rename = "ERROR")]
    Error(ErrorReport),
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Tpv {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<f64>,
    #[serde(rename = "altMSL")]
    pub alt_msl: Option<f64>,
    pub time: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Version {
    pub release: String,
    pub proto_major: u32,
    pub proto_minor: u32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ErrorReport {
    pub message: String,
}

impl From<Tpv> for Fix {
    fn from(tpv: Tpv) -> Self {
        Fix {
            latitude: tpv.lat,
            longitude: tpv.lon,
            // gpsd 3.20 deprecated `alt` in favour of `altMSL`
            altitude: tpv.alt.or(tpv.alt_msl),
            time: tpv.time,
        }
    }
}
