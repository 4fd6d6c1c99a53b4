use hict_core::{
    search_descending, ContigDescriptor, ContigDimensionHolder, ContigHideType, DimensionHolder,
    ResolutionKey, ResolutionTable,
};
use proptest::prelude::*;

const RESOLUTIONS: [u64; 4] = [1000, 250, 50, 10];

fn build_holder(lengths: &[u64], hidden: &[bool]) -> ContigDimensionHolder {
    let contigs: Vec<ContigDescriptor> = lengths
        .iter()
        .zip(hidden.iter().chain(std::iter::repeat(&false)))
        .enumerate()
        .map(|(i, (&len, &is_hidden))| {
            let mut contig = ContigDescriptor::new(i as u32, format!("ctg{}", i), len);
            if is_hidden {
                contig.presence_at_resolution.insert(1000, ContigHideType::AutoHidden);
            }
            contig
        })
        .collect();
    ContigDimensionHolder::new(&contigs, &RESOLUTIONS).expect("build holder")
}

proptest! {
    #[test]
    fn bin_bp_bin_roundtrip(
        lengths in prop::collection::vec(1u64..20_000, 1..12),
        hidden in prop::collection::vec(any::<bool>(), 0..12),
        res_idx in 0usize..RESOLUTIONS.len(),
        pick in any::<prop::sample::Index>(),
    ) {
        let holder = build_holder(&lengths, &hidden);
        let resolution = RESOLUTIONS[res_idx];
        let total = holder.total_bins_at(resolution).unwrap();
        prop_assume!(total > 0);
        let bin = pick.index(total as usize) as u64;
        let bp = holder.start_bp_of_bin(bin, resolution).unwrap();
        prop_assert_eq!(holder.bin_containing_bp(bp, resolution).unwrap(), bin);
    }

    #[test]
    fn start_bp_is_monotonic(
        lengths in prop::collection::vec(1u64..5_000, 1..8),
        hidden in prop::collection::vec(any::<bool>(), 0..8),
        res_idx in 0usize..RESOLUTIONS.len(),
    ) {
        let holder = build_holder(&lengths, &hidden);
        let resolution = RESOLUTIONS[res_idx];
        let total = holder.total_bins_at(resolution).unwrap();
        let mut prev = 0;
        for bin in 0..=total {
            let bp = holder.start_bp_of_bin(bin, resolution).unwrap();
            prop_assert!(bp >= prev);
            prev = bp;
        }
        prop_assert_eq!(prev, holder.total_bp());
    }

    #[test]
    fn clamped_bins_are_in_range(x in any::<i64>(), y in any::<i64>()) {
        let holder = build_holder(&[1_234, 5_678], &[]);
        let key = ResolutionKey::new(50);
        let total = holder.total_bins_at(50).unwrap();
        let [bx, by] = holder.clamp_bin_coordinates_at_resolution([x, y], key).unwrap();
        prop_assert!(bx < total && by < total);
    }

    #[test]
    fn lookup_between_levels_returns_upper_index(i in 1usize..4, t in 0.01f64..0.99) {
        let table = ResolutionTable::new(vec![64.0, 16.0, 4.0, 1.0], vec![1000, 250, 50, 10]).unwrap();
        let px = table.pixel_resolutions();
        let target = px[i] + (px[i - 1] - px[i]) * t;
        prop_assert_eq!(table.level_of(target), i);
        prop_assert_eq!(search_descending(px, px[i]).index, i);
    }
}

#[test]
fn string_and_numeric_keys_resolve_to_the_same_tier() {
    let holder = build_holder(&[10_000, 3_333], &[]);
    let key: ResolutionKey = "250".parse().unwrap();
    let clamped = holder.clamp_bin_coordinates_at_resolution([1_000, 3], key).unwrap();
    let last = holder.total_bins_at(key.resolution()).unwrap() - 1;
    assert_eq!(clamped, [last, 3]);
    let bp = holder.start_bp_of_bin(clamped[0], key.resolution()).unwrap();
    assert_eq!(holder.bin_containing_bp(bp, 250).unwrap(), last);
}
