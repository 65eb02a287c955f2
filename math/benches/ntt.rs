use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pir_math::dft::DFT;
use pir_math::dft::ntt::Ntt;
use pir_math::{Backend, Config, PrimeField};

/// (q, generator of the multiplicative group)
const MODULI: [(u32, u32); 3] = [(65537, 3), (998244353, 3), (12289, 11)];

fn field(q: u32, backend: Backend) -> PrimeField {
    PrimeField::with_config(q, &Config::default().with_backend(backend)).unwrap()
}

fn transform(field: PrimeField, generator: u32, n: usize) -> Ntt {
    let root: u32 = field.pow(generator, ((field.q() - 1) as usize / n) as u64);
    Ntt::try_new(field, n, root).unwrap()
}

fn ntt(c: &mut Criterion) {
    fn runner<const FORWARD: bool>(ntt: Ntt) -> Box<dyn FnMut()> {
        let q: u32 = ntt.field().q();
        let mut a: Vec<u32> = (0..ntt.n()).map(|i| i as u32 % q).collect();
        if FORWARD {
            Box::new(move || ntt.forward_inplace(&mut a).unwrap())
        } else {
            Box::new(move || ntt.backward_inplace(&mut a).unwrap())
        }
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("ntt");

    for log_n in 10..13 {
        let n: usize = 1 << log_n;
        for (q, generator) in MODULI {
            for backend in Backend::available() {
                let runners: [(String, Box<dyn FnMut()>); 2] = [
                    (format!("forward/q={q}/{backend:?}"), runner::<true>(transform(field(q, backend), generator, n))),
                    (format!("backward/q={q}/{backend:?}"), runner::<false>(transform(field(q, backend), generator, n))),
                ];
                for (name, mut runner) in runners {
                    let id: BenchmarkId = BenchmarkId::new(name, format!("n={n}"));
                    b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| b.iter(&mut runner));
                }
            }
        }
    }
}

fn convolution(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("ntt_convolution");

    for log_n in 10..13 {
        let n: usize = 1 << log_n;
        let q: u32 = 65537;
        let field: PrimeField = PrimeField::new(q);
        let root: u32 = field.pow(3, ((q - 1) as usize / n) as u64);
        let a: Vec<u32> = (0..n as u32).collect();
        let v: Vec<u32> = (0..n as u32).rev().collect();
        let mut result: Vec<u32> = vec![0; n];
        let id: BenchmarkId = BenchmarkId::new(format!("q={q}"), format!("n={n}"));
        b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| pir_math::convolution::ntt_convolution(&field, &a, &v, &mut result, root).unwrap())
        });
    }
}

criterion_group!(benches, ntt, convolution);
criterion_main!(benches);
