use std::collections::{HashMap, HashSet};

use super::Error;

/// Which frames to keep and how to transform their atoms.
///
/// `end` is inclusive; `None` means "through the last frame", so the
/// driver never needs to pre-scan the input to learn the frame count.
/// Sampling phase is relative to `start`, not to frame 0.
#[derive(Debug, Clone)]
pub struct Selection {
    pub start: usize,
    pub end: Option<usize>,
    pub sample_rate: usize,
    /// Atom types to keep; `None` keeps all. Dump-format input only.
    pub keep_types: Option<HashSet<u32>>,
    /// Atom type → output symbol. Types not present fall back to the
    /// textual type id. Dump-format input only.
    pub labels: HashMap<u32, String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            sample_rate: 1,
            keep_types: None,
            labels: HashMap::new(),
        }
    }
}

impl Selection {
    pub fn validate(&self) -> Result<(), Error> {
        if self.sample_rate == 0 {
            return Err(Error::SampleRate);
        }
        if let Some(end) = self.end
            && self.start > end
        {
            return Err(Error::Range {
                start: self.start,
                end,
            });
        }
        Ok(())
    }

    /// Pure inclusion policy: `start ≤ i ≤ end` and
    /// `(i − start) % sample_rate == 0`.
    pub fn included(&self, index: usize) -> bool {
        index >= self.start
            && !self.past_end(index)
            && (index - self.start) % self.sample_rate == 0
    }

    /// True once `index` is beyond `end`; the driver stops pulling here.
    pub fn past_end(&self, index: usize) -> bool {
        self.end.is_some_and(|end| index > end)
    }

    /// Parses `<positive type>:<non-empty symbol>` entries, e.g. `1:C 2:Xe`.
    pub fn parse_labels(entries: &[String]) -> Result<HashMap<u32, String>, Error> {
        let mut labels = HashMap::with_capacity(entries.len());
        for entry in entries {
            let invalid = || Error::Label {
                entry: entry.clone(),
            };

            let (type_str, symbol) = entry.split_once(':').ok_or_else(invalid)?;
            let type_id = type_str.parse::<u32>().map_err(|_| invalid())?;
            if type_id == 0 || symbol.is_empty() {
                return Err(invalid());
            }
            labels.insert(type_id, symbol.to_string());
        }
        Ok(labels)
    }
}
