pub mod catalog;
pub mod certifications;
pub mod companies;
pub mod datasheets;
pub mod manufacturers;
pub mod mfg_activities;
pub mod pv_modules;

pub use catalog::CatalogService;
pub use certifications::CertificationService;
pub use companies::CompanyService;
pub use datasheets::DatasheetService;
pub use manufacturers::ManufacturerService;
pub use mfg_activities::MfgActivityService;
pub use pv_modules::PvModuleService;

/// One page of an admin list plus the unpaginated total.
pub type Page<T> = (Vec<T>, u64);

/// Row offset of a 1-based page.
pub(crate) fn page_offset(page: u64, limit: u64) -> u64 {
    page.max(1).saturating_sub(1).saturating_mul(limit)
}

/// Deduplicates reference ids while keeping their first-seen order.
pub(crate) fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(0, 20), 0);
        assert_eq!(page_offset(3, 25), 50);
        assert_eq!(page_offset(u64::MAX, 20), u64::MAX);
    }

    #[test]
    fn dedup_keeps_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
