use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use spectral_phaser::{PhaserConfig, SpectralPhaser, StereoMode};

struct CountingAllocator;

static TRACK_ALLOCATIONS: AtomicBool = AtomicBool::new(false);
static ALLOC_CALLS: AtomicUsize = AtomicUsize::new(0);
static ALLOC_BYTES: AtomicUsize = AtomicUsize::new(0);
static REALLOC_CALLS: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL_ALLOCATOR: CountingAllocator = CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if TRACK_ALLOCATIONS.load(Ordering::Relaxed) {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
            ALLOC_BYTES.fetch_add(layout.size(), Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if TRACK_ALLOCATIONS.load(Ordering::Relaxed) {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
            ALLOC_BYTES.fetch_add(layout.size(), Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let out = unsafe { System.realloc(ptr, layout, new_size) };
        if TRACK_ALLOCATIONS.load(Ordering::Relaxed) {
            REALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
        }
        out
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

fn begin_alloc_tracking() {
    ALLOC_CALLS.store(0, Ordering::Relaxed);
    ALLOC_BYTES.store(0, Ordering::Relaxed);
    REALLOC_CALLS.store(0, Ordering::Relaxed);
    TRACK_ALLOCATIONS.store(true, Ordering::SeqCst);
}

fn end_alloc_tracking() -> (usize, usize, usize) {
    TRACK_ALLOCATIONS.store(false, Ordering::SeqCst);
    (
        ALLOC_CALLS.load(Ordering::Relaxed),
        REALLOC_CALLS.load(Ordering::Relaxed),
        ALLOC_BYTES.load(Ordering::Relaxed),
    )
}

// Single test in this binary: the allocator counts every thread
#[test]
fn process_and_reset_never_allocate() {
    const CHUNKS: [usize; 7] = [1, 7, 333, 64, 1000, 5, 4096];
    let total: usize = CHUNKS.iter().sum();

    // Buffers are sized before tracking starts
    let source: Vec<f32> = (0..total)
        .map(|n| (n as f32 * 0.031).sin() * 0.5 + (n as f32 * 0.173).sin() * 0.25)
        .collect();
    let mut left = vec![0.0f32; total];
    let mut right = vec![0.0f32; total];

    for stereo_mode in [StereoMode::DuplicateLeft, StereoMode::Independent] {
        for metallic in [false, true] {
            let config = PhaserConfig {
                seed: Some(5),
                stereo_mode,
                ..Default::default()
            };
            let mut phaser = SpectralPhaser::new(config, 44100.0).expect("valid config");
            phaser.params().set_metallic(metallic);
            phaser.params().set_morph(0.4);

            left.copy_from_slice(&source);
            right.copy_from_slice(&source);

            begin_alloc_tracking();
            for pass in 0..2 {
                let mut start = 0;
                for &len in &CHUNKS {
                    phaser.params().set_phase(start as f32 / total as f32);
                    phaser.process(&mut left[start..start + len], &mut right[start..start + len]);
                    start += len;
                }
                if pass == 0 {
                    phaser.reset();
                }
            }
            let (alloc_calls, realloc_calls, alloc_bytes) = end_alloc_tracking();

            assert_eq!(
                alloc_calls + realloc_calls,
                0,
                "{stereo_mode:?} metallic={metallic} allocated: alloc_calls={alloc_calls}, realloc_calls={realloc_calls}, alloc_bytes={alloc_bytes}"
            );
            assert!(left.iter().chain(&right).all(|x| x.is_finite()));
        }
    }
}
