use serde::{Deserialize, Serialize};

use crate::aggregate::{group_by, sum};
use crate::models::{BalanceSheetSection, LedgerLineItem, SectionedLineItem};
use crate::reconciler::MATCH_TOLERANCE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetSections {
    #[serde(default)]
    pub current_assets: Vec<LedgerLineItem>,
    #[serde(default)]
    pub non_current_assets: Vec<LedgerLineItem>,
    #[serde(default)]
    pub current_liabilities: Vec<LedgerLineItem>,
    #[serde(default)]
    pub long_term_liabilities: Vec<LedgerLineItem>,
    #[serde(default)]
    pub equity: Vec<LedgerLineItem>,
}

impl BalanceSheetSections {
    pub fn section(&self, section: BalanceSheetSection) -> &[LedgerLineItem] {
        match section {
            BalanceSheetSection::CurrentAssets => &self.current_assets,
            BalanceSheetSection::NonCurrentAssets => &self.non_current_assets,
            BalanceSheetSection::CurrentLiabilities => &self.current_liabilities,
            BalanceSheetSection::LongTermLiabilities => &self.long_term_liabilities,
            BalanceSheetSection::Equity => &self.equity,
        }
    }

    /// Moves every line of `other` onto the end of the matching section.
    pub fn append(&mut self, mut other: BalanceSheetSections) {
        self.current_assets.append(&mut other.current_assets);
        self.non_current_assets.append(&mut other.non_current_assets);
        self.current_liabilities.append(&mut other.current_liabilities);
        self.long_term_liabilities.append(&mut other.long_term_liabilities);
        self.equity.append(&mut other.equity);
    }

    fn section_mut(&mut self, section: BalanceSheetSection) -> &mut Vec<LedgerLineItem> {
        match section {
            BalanceSheetSection::CurrentAssets => &mut self.current_assets,
            BalanceSheetSection::NonCurrentAssets => &mut self.non_current_assets,
            BalanceSheetSection::CurrentLiabilities => &mut self.current_liabilities,
            BalanceSheetSection::LongTermLiabilities => &mut self.long_term_liabilities,
            BalanceSheetSection::Equity => &mut self.equity,
        }
    }
}

/// Builds sections from a flat list of tagged items, keeping input order
/// within each section.
pub fn sections_from_items(items: &[SectionedLineItem]) -> BalanceSheetSections {
    let mut sections = BalanceSheetSections::default();
    for (section, group) in group_by(items, |i| i.section) {
        sections
            .section_mut(section)
            .extend(group.into_iter().map(|i| i.item.clone()));
    }
    sections
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub current_assets: f64,
    pub non_current_assets: f64,
    pub total_assets: f64,
    pub current_liabilities: f64,
    pub long_term_liabilities: f64,
    pub total_liabilities: f64,
    pub total_equity: f64,
}

impl LedgerTotals {
    /// Assets minus liabilities and equity. Zero for a balanced sheet.
    pub fn identity_gap(&self) -> f64 {
        self.total_assets - (self.total_liabilities + self.total_equity)
    }

    pub fn is_balanced(&self) -> bool {
        self.identity_gap().abs() < MATCH_TOLERANCE
    }
}

/// Section subtotals and grand totals. The accounting identity is reported
/// through [`LedgerTotals::identity_gap`], never forced.
pub fn compute_ledger_totals(sections: &BalanceSheetSections) -> LedgerTotals {
    let subtotal = |s: BalanceSheetSection| sum(sections.section(s), |i| i.value);

    let current_assets = subtotal(BalanceSheetSection::CurrentAssets);
    let non_current_assets = subtotal(BalanceSheetSection::NonCurrentAssets);
    let current_liabilities = subtotal(BalanceSheetSection::CurrentLiabilities);
    let long_term_liabilities = subtotal(BalanceSheetSection::LongTermLiabilities);

    LedgerTotals {
        current_assets,
        non_current_assets,
        total_assets: current_assets + non_current_assets,
        current_liabilities,
        long_term_liabilities,
        total_liabilities: current_liabilities + long_term_liabilities,
        total_equity: subtotal(BalanceSheetSection::Equity),
    }
}
