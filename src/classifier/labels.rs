//! Label name <-> class id mapping (`label_map.json`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{FAKE_LABEL, REAL_LABEL};

/// Validated mapping between the FAKE/REAL label names and class ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct LabelMap {
    fake_id: i64,
    real_id: i64,
}

impl LabelMap {
    /// Build from `(name, id)` pairs. Names are matched case-insensitively
    /// and must be exactly FAKE and REAL with distinct ids.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut fake_id = None;
        let mut real_id = None;

        for (name, id) in pairs {
            let name = name.as_ref().trim().to_uppercase();
            let slot = match name.as_str() {
                FAKE_LABEL => &mut fake_id,
                REAL_LABEL => &mut real_id,
                other => return Err(format!("unexpected label '{other}' in label map")),
            };
            if slot.replace(id).is_some() {
                return Err(format!("label '{name}' appears more than once"));
            }
        }

        let fake_id = fake_id.ok_or_else(|| format!("label map is missing {FAKE_LABEL}"))?;
        let real_id = real_id.ok_or_else(|| format!("label map is missing {REAL_LABEL}"))?;
        if fake_id == real_id {
            return Err(format!(
                "{FAKE_LABEL} and {REAL_LABEL} share class id {fake_id}"
            ));
        }

        Ok(Self { fake_id, real_id })
    }

    pub fn fake_id(&self) -> i64 {
        self.fake_id
    }

    pub fn real_id(&self) -> i64 {
        self.real_id
    }

    /// Inverse lookup: class id -> label name
    pub fn name_of(&self, id: i64) -> Option<&'static str> {
        if id == self.fake_id {
            Some(FAKE_LABEL)
        } else if id == self.real_id {
            Some(REAL_LABEL)
        } else {
            None
        }
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            fake_id: 0,
            real_id: 1,
        }
    }
}

impl TryFrom<BTreeMap<String, i64>> for LabelMap {
    type Error = String;

    fn try_from(map: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<LabelMap> for BTreeMap<String, i64> {
    fn from(labels: LabelMap) -> Self {
        BTreeMap::from([
            (FAKE_LABEL.to_string(), labels.fake_id),
            (REAL_LABEL.to_string(), labels.real_id),
        ])
    }
}
