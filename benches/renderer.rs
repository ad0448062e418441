use badge_rs_renderer::layout::FastTextMeasurer;
use badge_rs_renderer::render::render_svg;
use badge_rs_renderer::theme::VERDANA_STACK;
use badge_rs_renderer::{
    BadgeRenderer, BadgeSpec, FontSpec, FontWeight, LinkMode, Links, LogoRef, StyleId,
    TextMeasurer,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sample_spec(name: &str) -> BadgeSpec {
    match name {
        "short" => BadgeSpec::new("build", "passing"),
        "message_only" => BadgeSpec::new("", "v1.2.3").with_color("blue"),
        "logo" => BadgeSpec::new("downloads", "1.2M/month")
            .with_color("orange")
            .with_logo(LogoRef::from_token("download")),
        "links" => BadgeSpec::new("docs", "latest").with_links(Links::new(
            Some("https://docs.example/"),
            Some("https://docs.example/latest/"),
        )),
        "long" => BadgeSpec::new(
            "coverage report for the default branch",
            "97.3% of 14 812 lines covered",
        ),
        _ => panic!("unknown sample"),
    }
}

const SAMPLES: [&str; 5] = ["short", "message_only", "logo", "links", "long"];

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");
    let font = FontSpec::new(VERDANA_STACK, 11.0, FontWeight::Normal);
    let uncached = FastTextMeasurer::new();
    let cached = FastTextMeasurer::with_cache(1024);
    for text in ["passing", "97.3% of 14 812 lines covered"] {
        group.bench_with_input(BenchmarkId::new("fast", text), text, |b, text| {
            b.iter(|| black_box(uncached.measure(black_box(text), &font)));
        });
        group.bench_with_input(BenchmarkId::new("fast_cached", text), text, |b, text| {
            b.iter(|| black_box(cached.measure(black_box(text), &font)));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let renderer = BadgeRenderer::default();
    for name in SAMPLES {
        let spec = sample_spec(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &spec, |b, spec| {
            b.iter(|| {
                let layout = renderer.layout(black_box(spec));
                black_box(layout.width);
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let renderer = BadgeRenderer::default();
    for style in StyleId::ALL {
        let spec = sample_spec("logo").with_style(style);
        let layout = renderer.layout(&spec);
        group.bench_with_input(
            BenchmarkId::from_parameter(style.as_str()),
            &layout,
            |b, layout| {
                b.iter(|| {
                    let svg = render_svg(black_box(layout), &spec.links, LinkMode::Legacy);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let renderer = BadgeRenderer::default();
    for name in SAMPLES {
        let spec = sample_spec(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &spec, |b, spec| {
            b.iter(|| {
                let badge = renderer.render(black_box(spec));
                black_box(badge.as_str().len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_measure, bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
