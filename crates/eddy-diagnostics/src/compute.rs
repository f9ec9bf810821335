//! Interior materialization of lazy fields.
//!
//! Both paths write values in `k`-major, `i`-fastest order, so the output
//! of [`compute_interior_parallel`] is bit-identical to
//! [`compute_interior`]: every point is evaluated exactly once by the same
//! kernel, only the thread differs.

use crossbeam_channel::SendError;
use eddy_core::{Extent, Field, Grid};

use crate::config::ComputeConfig;

/// Evaluate `field` at every interior index of `grid` on the calling thread.
pub fn compute_interior(field: &dyn Field, grid: &dyn Grid) -> Vec<f64> {
    grid.extent().iter().map(|idx| field.value(idx)).collect()
}

/// Evaluate `field` over the interior of `grid` on a pool of scoped workers.
///
/// The output is split into `k`-slabs and handed out through a
/// crossbeam channel; idle workers pull the next slab. With one resolved
/// worker, or a single slab, this falls back to [`compute_interior`].
pub fn compute_interior_parallel(
    field: &dyn Field,
    grid: &dyn Grid,
    config: &ComputeConfig,
) -> Vec<f64> {
    let extent = grid.extent();
    let workers = config.resolved_workers().min(extent.size[2]);
    if workers <= 1 || extent.is_empty() {
        return compute_interior(field, grid);
    }

    let mut out = vec![0.0; extent.len()];
    let (task_tx, task_rx) = crossbeam_channel::unbounded::<(usize, &mut [f64])>();

    std::thread::scope(|s| {
        for _ in 0..workers {
            let rx = task_rx.clone();
            s.spawn(move || {
                for (k, slab) in rx {
                    fill_slab(field, &extent, k, slab);
                }
            });
        }
        drop(task_rx);

        for (k, slab) in out.chunks_mut(extent.slab_len()).enumerate() {
            // All workers have exited; finish the slab here.
            if let Err(SendError((k, slab))) = task_tx.send((k, slab)) {
                fill_slab(field, &extent, k, slab);
            }
        }
        drop(task_tx);
    });

    out
}

fn fill_slab(field: &dyn Field, extent: &Extent, k: usize, slab: &mut [f64]) {
    for (value, idx) in slab.iter_mut().zip(extent.slab(k)) {
        *value = field.value(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_core::{Idx3, Loc3};
    use eddy_test_utils::{noise_field, uniform_grid, FnField};

    #[test]
    fn serial_order_is_k_major() {
        let grid = uniform_grid(3);
        let f = FnField::new(Loc3::CCC, |p: Idx3| (100 * p.k + 10 * p.j + p.i) as f64);
        let out = compute_interior(&f, &grid);
        assert_eq!(out.len(), 27);
        assert_eq!(&out[..4], &[0.0, 1.0, 2.0, 10.0]);
        assert_eq!(out[26], 222.0);
    }

    #[test]
    fn parallel_matches_serial() {
        let grid = uniform_grid(6);
        let f = noise_field(&grid, Loc3::FCC, 11);
        let serial = compute_interior(&f, &grid);
        for workers in [1, 2, 3, 8] {
            let cfg = ComputeConfig {
                workers: Some(workers),
            };
            let parallel = compute_interior_parallel(&f, &grid, &cfg);
            assert_eq!(serial, parallel, "workers={workers}");
        }
    }

    #[test]
    fn single_slab_runs_serially() {
        let grid = eddy_grid::RectilinearGrid::uniform([2, 2, 1], [1.0; 3]).unwrap();
        let f = FnField::new(Loc3::CCC, |_| 1.0);
        let cfg = ComputeConfig { workers: Some(4) };
        assert_eq!(compute_interior_parallel(&f, &grid, &cfg), vec![1.0; 4]);
    }
}
