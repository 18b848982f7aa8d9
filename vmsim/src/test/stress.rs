use rand::{rngs::SmallRng, Rng, RngCore, SeedableRng};

use super::get_test_manager;
use crate::SimConfig;

const SEED: u64 = 5446535461589659585;

/// Random load/store mix against a flat reference model, with only 4 frames
/// for 16 pages so pages constantly travel through swap.
#[test]
fn test_random_access_matches_flat_model() {
    let config = SimConfig {
        text_size: 64,
        data_size: 64,
        bss_size: 64,
        heap_stack_size: 64,
        page_size: 16,
        memory_size: 64,
    };

    let mut rand = SmallRng::seed_from_u64(SEED);
    let image: Vec<u8> = (0..128).map(|_| rand.next_u32() as u8).collect();

    // all segments are page-aligned, so the model is a flat byte array:
    // image content below 128, zeros above
    let mut model = vec![0u8; 256];
    model[..128].copy_from_slice(&image);

    let mut manager = get_test_manager(image, config);

    for _ in 0..20_000 {
        let address = rand.gen_range(0..256);
        if rand.gen_bool(0.5) {
            let value = rand.next_u32() as u8;
            manager.store(address, value).unwrap();
            model[address] = value;
        } else {
            assert_eq!(manager.load(address).unwrap(), model[address]);
        }
    }

    // full sweep at the end
    for address in 0..256 {
        assert_eq!(manager.load(address).unwrap(), model[address]);
    }
}
