use criterion::{criterion_group, criterion_main, Criterion};
use render_benchmarks::{interpolation::*, modes::*};

mod common;
mod render_benchmarks;

criterion_group! {
    name = modes;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = render_first_hit, render_mip, render_average, render_dvr, render_dvr_gradients
}

criterion_group! {
    name = interpolation;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = render_trilinear, render_small_steps
}

criterion_main!(modes, interpolation);
