use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use listdir::{Backend, FsEncoding, Lister};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;

const ENTRY_COUNTS: [usize; 3] = [16, 512, 4096];

// Builds (or reuses) a directory holding `count` files with varied name lengths
fn make_dir(count: usize) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("listdir_bench_{count}"));
    if fs::read_dir(&dir).map(Iterator::count).ok() == Some(count) {
        return dir;
    }
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create bench directory");

    let base_names = [
        "a",
        "file1",
        "document.txt",
        "file_with_medium_length_name",
        "very_long_filename_that_simulates_real_world_usage_patterns",
        "café_ünïcödé",
    ];
    for i in 0..count {
        let name = format!("{}_{i}", base_names[i % base_names.len()]);
        fs::File::create(dir.join(name)).expect("Failed to create bench file");
    }
    dir
}

fn backends() -> Vec<Backend> {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    return vec![Backend::ReadDir, Backend::GetDents];
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    return vec![Backend::ReadDir];
}

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("backend");

    for count in ENTRY_COUNTS {
        let dir = make_dir(count);
        group.throughput(Throughput::Elements(count as u64));

        for backend in backends() {
            let lister = Lister::new().backend(backend).text(Some(false));
            group.bench_with_input(BenchmarkId::new(backend.name(), count), &dir, |b, d| {
                b.iter(|| black_box(lister.list(black_box(d.as_path())).unwrap()))
            });
        }
    }
    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let count = 512;
    let dir = make_dir(count);
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("raw_bytes", |b| {
        let lister = Lister::new().text(Some(false));
        b.iter(|| black_box(lister.list(dir.as_path()).unwrap()))
    });

    for encoding in [FsEncoding::Utf8, FsEncoding::Ascii, FsEncoding::Latin1] {
        let lister = Lister::new().encoding(encoding).text(Some(true));
        group.bench_function(encoding.name(), |b| {
            b.iter(|| black_box(lister.list(dir.as_path()).unwrap()))
        });
    }

    group.bench_function("std_read_dir", |b| {
        b.iter(|| {
            let names: Vec<_> = fs::read_dir(&dir)
                .unwrap()
                .map(|e| e.unwrap().file_name())
                .collect();
            black_box(names)
        })
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(100)
        .warm_up_time(std::time::Duration::from_millis(500))
        .measurement_time(std::time::Duration::from_secs(3));
    targets = bench_backends, bench_decoding
}
criterion_main!(benches);
