use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use boxsmooth_image::Image;
use boxsmooth_imgproc::filter::{mean_filter_into_with, KernelSize, SmoothingMethod};
use boxsmooth_imgproc::parallel::ExecutionStrategy;

fn bench_mean_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mean Filter");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 9, 17].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_data = (0..width * height * 4).map(|i| (i % 256) as u8).collect();
            let image_size = [*width, *height].into();
            let image = Image::<u8, 4>::new(image_size, image_data).unwrap();

            // output image
            let output = Image::<u8, 4>::from_size_val(image_size, 0).unwrap();

            let kernel = KernelSize::new(*kernel_size).unwrap();

            for (name, strategy, method) in [
                (
                    "direct_serial",
                    ExecutionStrategy::Serial,
                    SmoothingMethod::Direct,
                ),
                (
                    "direct_parallel",
                    ExecutionStrategy::ParallelRows,
                    SmoothingMethod::Direct,
                ),
                (
                    "summed_area_serial",
                    ExecutionStrategy::Serial,
                    SmoothingMethod::SummedArea,
                ),
                (
                    "summed_area_parallel",
                    ExecutionStrategy::ParallelRows,
                    SmoothingMethod::SummedArea,
                ),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &(&image, &output),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        b.iter(|| {
                            black_box(mean_filter_into_with(
                                src, &mut dst, kernel, strategy, method,
                            ))
                        })
                    },
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_mean_filter);
criterion_main!(benches);
