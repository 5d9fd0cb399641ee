use cidkit_cid::{find_cid_references, generate, is_normalized_cid, parse};

fn make_data(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| (i.wrapping_mul(7) ^ (i >> 3)) as u8)
        .collect()
}

#[divan::bench(args = [16, 64, 65, 65536, 1048576])]
fn generate_cid(bencher: divan::Bencher, size: usize) {
    let data = make_data(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| generate(divan::black_box(&data)).unwrap());
}

#[divan::bench(args = [16, 64, 65536])]
fn parse_cid(bencher: divan::Bencher, size: usize) {
    let cid = generate(&make_data(size)).unwrap();
    bencher.bench(|| parse(divan::black_box(&cid)).unwrap());
}

#[divan::bench(args = [16, 64, 65536])]
fn validate_cid(bencher: divan::Bencher, size: usize) {
    let cid = generate(&make_data(size)).unwrap();
    bencher.bench(|| is_normalized_cid(divan::black_box(&cid)));
}

#[divan::bench]
fn scan_document(bencher: divan::Bencher) {
    let mut text = String::new();
    for i in 0..200usize {
        let cid = generate(&make_data(i * 3)).unwrap();
        text.push_str(&format!("Paragraph {i} links to [item](/{cid}.txt) and more prose.\n"));
    }
    bencher
        .counter(divan::counter::BytesCount::new(text.len()))
        .bench(|| find_cid_references(divan::black_box(&text)));
}

fn main() {
    divan::main();
}
