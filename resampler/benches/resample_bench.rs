use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use pcm_resampler::codec::bytes_from_samples;
use pcm_resampler::{Config, Format, Resampler};

fn noise(samples: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    let data: Vec<i16> = (0..samples)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 48) as i16
        })
        .collect();
    bytes_from_samples(&data)
}

fn bench_convert(c: &mut Criterion, name: &str, src: Format, dst: Format) {
    // One second of input, fed in 20ms chunks.
    let input = noise(src.sample_rate as usize * src.channels as usize, 42);
    let chunk = src.frame_bytes() * src.sample_rate as usize / 50;

    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("1s", |b| {
        b.iter(|| {
            let mut r = Resampler::new(Config::from_formats(src, dst)).unwrap();
            let mut n = 0;
            for piece in input.chunks(chunk) {
                n += r.feed(black_box(piece)).len();
            }
            n += r.finish().len();
            black_box(n)
        })
    });
    group.finish();
}

fn bench_downsample(c: &mut Criterion) {
    bench_convert(c, "48k_stereo_to_24k_mono", Format::STEREO_48K, Format::MONO_24K);
}

fn bench_upsample(c: &mut Criterion) {
    bench_convert(c, "24k_mono_to_48k_stereo", Format::MONO_24K, Format::STEREO_48K);
}

criterion_group!(benches, bench_downsample, bench_upsample);
criterion_main!(benches);
