use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sm3kit::{Buffer, BufferReader, BufferWriter};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("append 4096 single bytes", |b| {
        b.iter(|| {
            let mut buf = Buffer::new();
            for i in 0..4096u32 {
                buf.append_byte(i as u8);
            }
            black_box(buf.capacity());
        })
    });

    c.bench_function("write and read 512 u64", |b| {
        b.iter(|| {
            let mut buf = Buffer::new();
            let mut w = BufferWriter::new(&mut buf);
            for i in 0..512u64 {
                w.write(i);
            }

            let mut r = BufferReader::new(&buf);
            let mut sum = 0u64;
            while let Ok(v) = r.read::<u64>() {
                sum = sum.wrapping_add(v);
            }
            black_box(sum);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
