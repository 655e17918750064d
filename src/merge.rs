use crate::types::RawMapping;

/// Merge `overlay` on top of `base`. On a key collision `overlay`'s value wins.
pub fn merge_overwriting(mut base: RawMapping, overlay: RawMapping) -> RawMapping {
    base.extend(overlay);
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::mapping;

    #[test]
    fn disjoint_keys_merge() {
        let merged = merge_overwriting(mapping(&[("HOST", "localhost")]), mapping(&[("PORT", "3000")]));
        assert_eq!(merged, mapping(&[("HOST", "localhost"), ("PORT", "3000")]));
    }

    #[test]
    fn same_key_overlay_wins() {
        let merged = merge_overwriting(mapping(&[("PORT", "8080")]), mapping(&[("PORT", "3000")]));
        assert_eq!(merged["PORT"], "3000");
    }

    #[test]
    fn overlay_empty_string_still_wins() {
        let merged = merge_overwriting(mapping(&[("TOKEN", "abc")]), mapping(&[("TOKEN", "")]));
        assert_eq!(merged["TOKEN"], "");
    }

    #[test]
    fn empty_overlay_returns_base() {
        let base = mapping(&[("PORT", "8080")]);
        assert_eq!(merge_overwriting(base.clone(), RawMapping::new()), base);
    }

    #[test]
    fn empty_base_returns_overlay() {
        let overlay = mapping(&[("PORT", "3000")]);
        assert_eq!(merge_overwriting(RawMapping::new(), overlay.clone()), overlay);
    }

    #[test]
    fn multiple_sequential_merges() {
        let a = mapping(&[("HOST", "a")]);
        let b = mapping(&[("PORT", "1000")]);
        let c = mapping(&[("HOST", "c")]);
        let merged = merge_overwriting(merge_overwriting(a, b), c);
        assert_eq!(merged["HOST"], "c");
        assert_eq!(merged["PORT"], "1000");
    }
}
