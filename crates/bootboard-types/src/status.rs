use serde::{Deserialize, Serialize};

/// Boot/build outcome. Anything outside the known set maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Offline,
    Unknown,
}

impl Status {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("PASS") => Status::Pass,
            Some("FAIL") => Status::Fail,
            Some("OFFLINE") => Status::Offline,
            _ => Status::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Offline => "OFFLINE",
            Status::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_is_total() {
        assert_eq!(Status::from_raw(Some("PASS")), Status::Pass);
        assert_eq!(Status::from_raw(Some("FAIL")), Status::Fail);
        assert_eq!(Status::from_raw(Some("OFFLINE")), Status::Offline);
        assert_eq!(Status::from_raw(Some("")), Status::Unknown);
        assert_eq!(Status::from_raw(Some("WEIRD")), Status::Unknown);
        assert_eq!(Status::from_raw(Some("pass")), Status::Unknown);
        assert_eq!(Status::from_raw(None), Status::Unknown);
    }
}
