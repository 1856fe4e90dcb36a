use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::io::Cursor;
use std::time::Duration;
use xo::{LineBuffer, TabSetting};

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|n| format!("\tline {} with\ttabs and some trailing words", n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 大きなファイルを開いて 1 画面分だけ読む
fn bench_first_screen(c: &mut Criterion) {
    let mut group = c.benchmark_group("lazy_open");
    group.measurement_time(Duration::from_secs(5));

    let text = sample_text(200_000).into_bytes();
    group.bench_function("first_screen_of_200k_lines", |b| {
        b.iter_batched(
            || Cursor::new(text.clone()),
            |reader| {
                let mut buffer = LineBuffer::from_reader(reader, TabSetting::default());
                buffer.ensure_materialized(black_box(50)).unwrap();
                buffer.len()
            },
            BatchSize::LargeInput,
        )
    });

    // 保存は未読行を全て読むので行数に比例する
    group.bench_function("save_200k_lines_after_first_screen", |b| {
        b.iter_batched(
            || {
                let mut buffer = LineBuffer::from_reader(Cursor::new(text.clone()), TabSetting::default());
                buffer.ensure_materialized(50).unwrap();
                buffer
            },
            |mut buffer| black_box(buffer.flatten_for_save().unwrap()).len(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

/// 編集行の保存形式（再タブ化を含む）
fn bench_saved_form(c: &mut Criterion) {
    let tabs = TabSetting::new(8, true);
    let text = sample_text(1_000);
    c.bench_function("flatten_1k_edited_lines", |b| {
        b.iter_batched(
            || {
                let mut buffer = LineBuffer::from_reader(Cursor::new(text.clone().into_bytes()), tabs);
                buffer.ensure_materialized(1_000).unwrap();
                for index in 0..buffer.len() {
                    if let Some(line) = buffer.line_mut(index) {
                        line.move_end();
                        line.insert_text(" x");
                    }
                }
                buffer
            },
            |mut buffer| black_box(buffer.flatten_for_save().unwrap()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_first_screen, bench_saved_form);
criterion_main!(benches);
