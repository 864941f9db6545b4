use criterion::{black_box, measurement::Measurement, BenchmarkGroup, BenchmarkId};
use homhash::{MatrixHash, SetHash};
use rand::{prelude::*, rngs::StdRng};

pub const ITEM_LEN: usize = 32;

pub fn generate_items(size: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(123_456_789u64);
    (0..size)
        .map(|_| {
            let mut item = vec![0u8; ITEM_LEN];
            rng.fill_bytes(&mut item);
            item
        })
        .collect()
}

pub fn generate_two_item_sets(size: usize) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
    let half_size = size / 2;
    assert!(half_size > 0);
    let items = generate_items(size + half_size);
    (items[..size].to_vec(), items[half_size..].to_vec())
}

pub struct Fixture<H: SetHash> {
    pub scheme_name: &'static str,
    pub empty: H,
}

impl<H: SetHash> Fixture<H> {
    pub fn new(scheme_name: &'static str, empty: H) -> Self {
        Self { scheme_name, empty }
    }

    pub fn bench_insert<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        items: &[Vec<u8>],
    ) {
        group.bench_with_input(
            BenchmarkId::new(self.scheme_name, items.len()),
            items,
            |b, items| b.iter(|| black_box(self.empty.insert(items))),
        );
    }

    pub fn bench_remove<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        items: &[Vec<u8>],
    ) {
        let full = self.empty.insert(items);
        group.bench_with_input(
            BenchmarkId::new(self.scheme_name, items.len()),
            items,
            |b, items| b.iter(|| black_box(full.remove(items))),
        );
    }

    pub fn bench_union<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        s1: &[Vec<u8>],
        s2: &[Vec<u8>],
    ) {
        let acc1 = self.empty.insert(s1);
        let acc2 = self.empty.insert(s2);
        group.bench_with_input(
            BenchmarkId::new(self.scheme_name, s1.len()),
            &(acc1, acc2),
            |b, (acc1, acc2)| b.iter(|| black_box(acc1.union(acc2))),
        );
    }

    pub fn bench_difference<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        s1: &[Vec<u8>],
        s2: &[Vec<u8>],
    ) {
        let acc1 = self.empty.insert(s1);
        let acc2 = self.empty.insert(s2);
        group.bench_with_input(
            BenchmarkId::new(self.scheme_name, s1.len()),
            &(acc1, acc2),
            |b, (acc1, acc2)| b.iter(|| black_box(acc1.difference(acc2))),
        );
    }

    pub fn bench_digest<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        items: &[Vec<u8>],
    ) {
        // a pending removal makes the digest pay for normalization where it applies
        let acc = self.empty.insert(items).remove(&items[..1]);
        group.bench_with_input(
            BenchmarkId::new(self.scheme_name, items.len()),
            &acc,
            |b, acc| b.iter(|| black_box(acc.digest())),
        );
    }
}

pub fn bench_matrix_insert<'a, M: Measurement>(
    group: &mut BenchmarkGroup<'a, M>,
    items: &[Vec<u8>],
) {
    let empty = MatrixHash::new();
    group.bench_with_input(BenchmarkId::new("matrix", items.len()), items, |b, items| {
        b.iter(|| black_box(empty.insert(items)))
    });
}

pub fn bench_matrix_concat<'a, M: Measurement>(
    group: &mut BenchmarkGroup<'a, M>,
    s1: &[Vec<u8>],
    s2: &[Vec<u8>],
) {
    let empty = MatrixHash::new();
    let acc1 = empty.insert(s1).unwrap();
    let acc2 = empty.insert(s2).unwrap();
    group.bench_with_input(
        BenchmarkId::new("matrix", s1.len()),
        &(acc1, acc2),
        |b, (acc1, acc2)| b.iter(|| black_box(acc1.concat(acc2))),
    );
}

#[macro_export]
macro_rules! prepare_fixtures {
    () => {
        $crate::prepare_fixtures!(F_ECMH, homhash::RistrettoMultisetHash, "ecmh");
        $crate::prepare_fixtures!(F_LTHASH, homhash::LtHash, "lthash");
        $crate::prepare_fixtures!(F_MUHASH, homhash::MuHash, "muhash");
    };

    ($name: ident, $scheme: ty, $scheme_name: expr) => {
        static $name: once_cell::sync::Lazy<$crate::Fixture<$scheme>> =
            once_cell::sync::Lazy::new(|| {
                println!("prepare fixture for {}...", $scheme_name);
                $crate::Fixture::new($scheme_name, <$scheme>::default())
            });
    };
}

#[macro_export]
macro_rules! iterate_fixtures {
    ($x: expr) => {
        $crate::iterate_fixtures!(F_ECMH, $x);
        $crate::iterate_fixtures!(F_LTHASH, $x);
        $crate::iterate_fixtures!(F_MUHASH, $x);
    };

    ($name: ident, $x: expr) => {
        ($x)(once_cell::sync::Lazy::force(&$name))
    };
}
