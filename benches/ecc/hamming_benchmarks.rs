use bitvec::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamming_ecc::ecc::bits::BitWord;
use hamming_ecc::{decode, encode, HammingCode, HammingConfig};

fn word(len: usize) -> BitWord {
    (0..len).map(|i| (i * 7 + 3) % 5 < 2).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_encode");
    let config = HammingConfig::extended();
    for k in [4, 11, 26, 57, 120] {
        let data = word(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &data, |b, data| {
            b.iter(|| encode(black_box(data), &config))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_decode");
    let config = HammingConfig::extended();
    for k in [4, 11, 26, 57, 120] {
        let mut codeword = encode(&word(k), &config);
        // Single error in the middle of the word
        let mid = codeword.len() / 2;
        let bit = codeword[mid];
        codeword.set(mid, !bit);
        group.bench_with_input(BenchmarkId::from_parameter(k), &codeword, |b, codeword| {
            b.iter(|| decode(black_box(codeword), &config))
        });
    }
    group.finish();
}

fn bench_streams(c: &mut Criterion) {
    let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
    let code = HammingCode::new(64, HammingConfig::extended()).unwrap();
    let encoded = code.encode_bytes(&data);

    c.bench_function("hamming_72_64_encode_4k", |b| {
        b.iter(|| code.encode_bytes(black_box(&data)))
    });
    c.bench_function("hamming_72_64_decode_4k", |b| {
        b.iter(|| code.decode_bytes(black_box(&encoded)))
    });

    let words: Vec<BitWord> = data
        .chunks(8)
        .map(|chunk| chunk.view_bits::<Msb0>().to_bitvec())
        .collect();
    c.bench_function("hamming_72_64_encode_words_parallel", |b| {
        b.iter(|| code.encode_words(black_box(&words)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_streams);
criterion_main!(benches);
