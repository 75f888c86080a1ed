use std::fmt;

/// Rendered in place of any field the daemon did not supply.
pub const NO_FIX: &str = "nan";

/// One position reading. Any field may be absent when the daemon did not populate it.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Fix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>, // In meters
    pub time: Option<String>,
}

impl Fix {
    /// Latitude alone decides whether a fix is worth persisting.
    pub fn has_position(&self) -> bool {
        self.latitude.is_some()
    }
}

struct Field<'a, T>(&'a Option<T>);

impl fmt::Display for Field<'_, f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            // Plain decimal notation, with `.0` on whole numbers
            Some(value) if value.is_finite() && value.fract() == 0.0 => write!(f, "{:.1}", value),
            Some(value) => write!(f, "{}", value),
            None => f.write_str(NO_FIX),
        }
    }
}

impl fmt::Display for Field<'_, String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One field on the line, whatever whitespace the daemon put inside it
        let mut words = self.0.as_deref().unwrap_or_default().split_whitespace();
        match words.next() {
            Some(first) => {
                f.write_str(first)?;
                words.try_for_each(|word| write!(f, "_{}", word))
            }
            None => f.write_str(NO_FIX),
        }
    }
}

/// Whitespace-joined latitude, longitude, altitude and time, the format used both for output and storage.
impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            Field(&self.latitude),
            Field(&self.longitude),
            Field(&self.altitude),
            Field(&self.time)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn formats_a_full_fix() {
        let fix = Fix {
            latitude: Some(37.5),
            longitude: Some(-122.1),
            altitude: Some(10.0),
            time: Some("2023-01-01T00:00:00Z".to_string()),
        };

        assert_eq!(fix.to_string(), "37.5 -122.1 10.0 2023-01-01T00:00:00Z");
    }

    #[test]
    fn formats_absent_fields_as_sentinel() {
        assert_eq!(Fix::default().to_string(), "nan nan nan nan");
    }

    #[rstest]
    #[case(Some(51.8615899), Some(4.3580323), None, "51.8615899 4.3580323 nan nan")]
    #[case(Some(0.0), Some(0.0), Some(-3.25), "0.0 0.0 -3.25 nan")]
    #[case(None, Some(4.0), Some(2.0), "nan 4.0 2.0 nan")]
    fn formats_partial_fixes(#[case] latitude: Option<f64>, #[case] longitude: Option<f64>, #[case] altitude: Option<f64>, #[case] expected: &str) {
        let fix = Fix {
            latitude,
            longitude,
            altitude,
            time: None,
        };

        assert_eq!(fix.to_string(), expected);
    }

    #[test]
    fn an_empty_time_keeps_four_fields() {
        let fix = Fix {
            time: Some(String::new()),
            ..Fix::default()
        };

        assert_eq!(fix.to_string().split_whitespace().count(), 4);
    }

    #[rstest]
    #[case(" 2023-01-01 00:00:00 ", "2023-01-01_00:00:00")]
    #[case("2023-01-01T00:00:00\tZ", "2023-01-01T00:00:00_Z")]
    #[case("2023-01-01T00:00:00.000Z", "2023-01-01T00:00:00.000Z")]
    fn joins_whitespace_inside_the_time(#[case] time: &str, #[case] expected: &str) {
        let fix = Fix {
            time: Some(time.to_string()),
            ..Fix::default()
        };

        let line = fix.to_string();

        assert_eq!(line.split_whitespace().count(), 4);
        assert_eq!(line.split_whitespace().last(), Some(expected));
    }

    #[rstest]
    #[case(10.0, "10.0")]
    #[case(-0.0, "-0.0")]
    #[case(1e-7, "0.0000001")]
    #[case(1e20, "100000000000000000000.0")]
    #[case(-122.1, "-122.1")]
    #[case(51.8615899, "51.8615899")]
    fn formats_coordinates_without_exponents(#[case] value: f64, #[case] expected: &str) {
        let fix = Fix {
            latitude: Some(value),
            ..Fix::default()
        };

        assert_eq!(fix.to_string(), format!("{} nan nan nan", expected));
    }

    #[rstest]
    #[case(Fix { latitude: Some(1.0), ..Fix::default() }, true)]
    #[case(Fix { longitude: Some(1.0), altitude: Some(1.0), time: Some("t".to_string()), ..Fix::default() }, false)]
    #[case(Fix::default(), false)]
    fn only_latitude_gates_position(#[case] fix: Fix, #[case] expected: bool) {
        assert_eq!(fix.has_position(), expected);
    }
}
