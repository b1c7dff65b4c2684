//! Per-record expansion flags for the history view.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{HistoryError, Result};
use crate::model::PaymentRecord;

/// Collapsible parts of a payment card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Details,
    Products,
    Returns,
    Reductions,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Details,
        Section::Products,
        Section::Returns,
        Section::Reductions,
    ];

    fn index(self) -> usize {
        match self {
            Self::Details => 0,
            Self::Products => 1,
            Self::Returns => 2,
            Self::Reductions => 3,
        }
    }
}

impl FromStr for Section {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "details" => Ok(Self::Details),
            "products" => Ok(Self::Products),
            "returns" => Ok(Self::Returns),
            "reductions" => Ok(Self::Reductions),
            other => Err(HistoryError::UnknownSection(other.to_string())),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Details => write!(f, "details"),
            Self::Products => write!(f, "products"),
            Self::Returns => write!(f, "returns"),
            Self::Reductions => write!(f, "reductions"),
        }
    }
}

/// Expansion flags keyed by payment id. Flags of different records and
/// different sections are independent.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    flags: HashMap<String, [bool; 4]>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, payment_id: &str, section: Section) -> bool {
        self.flags
            .get(payment_id)
            .is_some_and(|flags| flags[section.index()])
    }

    /// Whether a section should be shown. Sub-sections only show inside an
    /// expanded card.
    pub fn is_visible(&self, payment_id: &str, section: Section) -> bool {
        match section {
            Section::Details => self.is_expanded(payment_id, Section::Details),
            _ => {
                self.is_expanded(payment_id, Section::Details)
                    && self.is_expanded(payment_id, section)
            }
        }
    }

    /// Flip a flag and return its new value
    pub fn toggle(&mut self, payment_id: &str, section: Section) -> bool {
        let flags = self.flags.entry(payment_id.to_string()).or_default();
        let flag = &mut flags[section.index()];
        *flag = !*flag;
        *flag
    }

    pub fn expand(&mut self, payment_id: &str, section: Section) {
        self.flags.entry(payment_id.to_string()).or_default()[section.index()] = true;
    }

    pub fn collapse(&mut self, payment_id: &str, section: Section) {
        if let Some(flags) = self.flags.get_mut(payment_id) {
            flags[section.index()] = false;
        }
    }

    pub fn expand_all(&mut self, records: &[PaymentRecord]) {
        for record in records {
            for section in Section::ALL {
                self.expand(record.id(), section);
            }
        }
    }

    /// Open a target, including the card that holds it
    pub fn open(&mut self, target: &ExpandTarget) {
        self.expand(&target.payment_id, Section::Details);
        self.expand(&target.payment_id, target.section);
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

/// A `payment-id[:section]` reference from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandTarget {
    pub payment_id: String,
    pub section: Section,
}

impl FromStr for ExpandTarget {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        let (id, section) = match s.split_once(':') {
            Some((id, section)) => (id.trim(), section.parse()?),
            None => (s.trim(), Section::Details),
        };
        if id.is_empty() {
            return Err(HistoryError::InvalidExpandTarget(s.to_string()));
        }
        Ok(Self {
            payment_id: id.to_string(),
            section,
        })
    }
}
