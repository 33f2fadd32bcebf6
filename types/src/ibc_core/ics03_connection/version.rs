use std::fmt::{Display, Error as FmtError, Formatter};

use ibc_proto::ibc::core::connection::v1::Version as RawVersion;
use serde::{Deserialize, Serialize};

/// The connection version with its supported channel orderings. Only the
/// default version `1` exists today.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    identifier: String,
    features: Vec<String>,
}

impl Default for Version {
    fn default() -> Self {
        Version {
            identifier: "1".to_string(),
            features: vec!["ORDER_ORDERED".to_string(), "ORDER_UNORDERED".to_string()],
        }
    }
}

impl From<RawVersion> for Version {
    fn from(raw: RawVersion) -> Self {
        Version {
            identifier: raw.identifier,
            features: raw.features,
        }
    }
}

impl From<Version> for RawVersion {
    fn from(version: Version) -> Self {
        RawVersion {
            identifier: version.identifier,
            features: version.features,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "Version {{ identifier: {}, features: {} }}",
            self.identifier,
            self.features.join(", ")
        )
    }
}
