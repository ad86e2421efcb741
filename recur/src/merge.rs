use std::collections::BTreeMap;

use jiff::civil::Date;

/// A generated date plus the indices of the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedDate {
    pub date: Date,
    /// First-seen order, no repeats.
    pub rules: Vec<usize>,
}

impl MergedDate {
    pub fn matched_by(&self, rule: usize) -> bool {
        self.rules.contains(&rule)
    }

    pub fn is_shared(&self) -> bool {
        self.rules.len() > 1
    }
}

/// Combine per-rule date sequences into one ascending, deduplicated sequence.
pub fn merge<I, D>(sequences: I) -> Vec<MergedDate>
where
    I: IntoIterator<Item = (usize, D)>,
    D: IntoIterator<Item = Date>,
{
    let mut by_date: BTreeMap<Date, Vec<usize>> = BTreeMap::new();
    for (rule, dates) in sequences {
        for date in dates {
            let rules = by_date.entry(date).or_default();
            if !rules.contains(&rule) {
                rules.push(rule);
            }
        }
    }
    by_date
        .into_iter()
        .map(|(date, rules)| MergedDate { date, rules })
        .collect()
}
