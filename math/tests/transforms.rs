use pir_math::api;
use pir_math::convolution::{CirculantMatrix, circulant_vector_mul, ntt_convolution};
use pir_math::dft::DFT;
use pir_math::dft::ntt::Ntt;
use pir_math::permutation::bit_reversal_cache;
use pir_math::{Backend, Config, FermatReduction, FieldError, PrimeField};
use pir_sampling::Source;

#[test]
fn transforms() {
    sub_test("scenario_evaluation", scenario_evaluation);
    sub_test("round_trip_all_backends", round_trip_all_backends);
    sub_test("convolution_is_polynomial_product_when_padded", convolution_is_polynomial_product_when_padded);
    sub_test("circulant_products", circulant_products);
    sub_test("concurrent_transforms", concurrent_transforms);
    sub_test("checked_entry_points", checked_entry_points);
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn scenario_evaluation() {
    let q: u32 = 17;
    let a: Vec<u32> = vec![1, 2, 3, 4];
    let mut b: Vec<u32> = a.clone();
    api::try_ntt(&mut b, 4, q).unwrap();
    let field: PrimeField = PrimeField::new(q);
    for (k, x) in [1, 4, 16, 13].into_iter().enumerate() {
        let eval: u32 = a.iter().rev().fold(0, |acc, &c| field.add(field.mul(acc, x), c));
        assert_eq!(b[k], eval);
    }
}

fn round_trip_all_backends() {
    let mut source: Source = Source::new([7u8; 32]);
    for q in [65537u32, 998244353, 12289] {
        for backend in Backend::available() {
            for reduction in [FermatReduction::Fast, FermatReduction::Safe] {
                let config: Config = Config::default().with_backend(backend).with_fermat_reduction(reduction);
                let field: PrimeField = PrimeField::with_config(q, &config).unwrap();
                let n: usize = 1 << 9;
                let root: u32 = field.primitive_root_of_unity(n as u32, &mut source).unwrap();
                let ntt: Ntt = Ntt::try_new(field, n, root).unwrap();
                let a: Vec<u32> = field.sample_vector(&mut source, n);
                let mut b: Vec<u32> = a.clone();
                ntt.forward_inplace(&mut b).unwrap();
                ntt.backward_inplace(&mut b).unwrap();
                assert_eq!(a, b, "q={q} {backend:?} {reduction:?}");
            }
        }
    }
}

fn convolution_is_polynomial_product_when_padded() {
    let q: u32 = 998244353;
    let field: PrimeField = PrimeField::new(q);
    let mut source: Source = Source::new([8u8; 32]);
    let deg: usize = 20;
    let n: usize = 64;
    let root: u32 = field.primitive_root_of_unity(n as u32, &mut source).unwrap();

    let mut a: Vec<u32> = vec![0; n];
    let mut b: Vec<u32> = vec![0; n];
    field.fill_uniform(&mut source, &mut a[..=deg]);
    field.fill_uniform(&mut source, &mut b[..=deg]);

    let mut want: Vec<u32> = vec![0; n];
    for i in 0..=deg {
        for j in 0..=deg {
            want[i + j] = field.add(want[i + j], field.mul(a[i], b[j]));
        }
    }

    let mut have: Vec<u32> = vec![0; n];
    ntt_convolution(&field, &a, &b, &mut have, root).unwrap();
    assert_eq!(have, want);
}

fn circulant_products() {
    let q: u32 = 65537;
    let field: PrimeField = PrimeField::new(q);
    let mut source: Source = Source::new([9u8; 32]);
    let n: usize = 32;
    let root: u32 = field.primitive_root_of_unity(n as u32, &mut source).unwrap();
    let column: Vec<u32> = field.sample_vector(&mut source, n);
    let matrix: CirculantMatrix = CirculantMatrix::try_new(field, &column, root).unwrap();
    assert_eq!(matrix.n(), n);

    // Columns of the circulant matrix are the cyclic shifts of its first column.
    let mut e: Vec<u32> = vec![0; n];
    let mut have: Vec<u32> = vec![0; n];
    for j in 0..n {
        e.fill(0);
        e[j] = 1;
        matrix.mul_vector(&e, &mut have).unwrap();
        let want: Vec<u32> = (0..n).map(|i| column[(i + n - j) % n]).collect();
        assert_eq!(have, want);
    }

    let v: Vec<u32> = field.sample_vector(&mut source, n);
    let mut from_matrix: Vec<u32> = vec![0; n];
    matrix.mul_vector(&v, &mut from_matrix).unwrap();
    circulant_vector_mul(&field, &column, &v, &mut have, root).unwrap();
    assert_eq!(have, from_matrix);
}

fn concurrent_transforms() {
    let q: u32 = 65537;
    let results: Vec<Vec<u32>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8u8)
            .map(|t| {
                s.spawn(move || {
                    let field: PrimeField = PrimeField::new(q);
                    let n: usize = 1 << (4 + t % 4);
                    let root: u32 = field.pow(3, ((q - 1) as usize / n) as u64);
                    let a: Vec<u32> = field.sample_vector(&mut Source::new([t; 32]), n);
                    let mut b: Vec<u32> = a.clone();
                    api::ntt(&mut b, root, q).unwrap();
                    api::intt(&mut b, root, q).unwrap();
                    assert_eq!(a, b);
                    b
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results.len(), 8);
    for log_n in 4..8 {
        assert!(bit_reversal_cache().is_cached(1 << log_n));
    }
}

fn checked_entry_points() {
    let mut a: Vec<u32> = vec![1, 2, 3, 4, 5, 6, 7, 8];
    assert!(matches!(
        api::try_ntt(&mut a, 4, 17),
        Err(FieldError::NotPrimitiveRoot { root: 4, n: 8, q: 17 })
    ));
    assert_eq!(a, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert!(api::try_ntt(&mut a, 2, 17).is_ok());
    assert!(matches!(
        api::try_ntt(&mut a[..4], 4, 7),
        Err(FieldError::OrderNotDividing { n: 4, q: 7 })
    ));
    let mut result: Vec<u32> = vec![0; 4];
    assert!(matches!(
        api::try_ntt_convolution(&[1, 2, 3, 4], &[1, 2, 3], &mut result, 4, 17),
        Err(FieldError::LengthMismatch { expected: 4, got: 3 })
    ));
    assert!(matches!(
        PrimeField::with_config(17, &Config::default().with_max_root_attempts(0))
            .unwrap()
            .primitive_root_of_unity(4, &mut Source::new([0u8; 32])),
        Err(FieldError::RootSearchExhausted { attempts: 0, .. })
    ));
}
