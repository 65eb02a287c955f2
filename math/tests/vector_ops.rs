use pir_math::api::{
    field_add_vectors, field_mod_vector, field_mul_vector, field_mul_vectors, field_neg_vector, field_sub_vectors,
};
use pir_math::{Backend, Config, FermatReduction, PrimeField, VectorOperations};
use pir_sampling::Source;

const FERMAT: [u32; 5] = [3, 5, 17, 257, 65537];
const GENERIC: [u32; 4] = [7, 12289, 998244353, 4294967291];

#[test]
fn vector_ops() {
    sub_test("scalar_multiply_fermat", scalar_multiply_fermat);
    sub_test("backends_agree_with_scalar", backends_agree_with_scalar);
    sub_test("boundary_operands", boundary_operands);
    sub_test("canonical_ops_match_field", canonical_ops_match_field);
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn scalar_multiply_fermat() {
    let mut dst: Vec<u32> = vec![0; 4];
    field_mul_vector(&mut dst, &[65536, 1, 2, 3], 2, 65537);
    assert_eq!(dst, vec![65535, 2, 4, 6]);
}

fn backends_agree_with_scalar() {
    let mut source: Source = Source::new([0u8; 32]);
    for q in FERMAT.into_iter().chain(GENERIC) {
        for reduction in [FermatReduction::Fast, FermatReduction::Safe] {
            let config: Config = Config::default().with_fermat_reduction(reduction);
            let reference: PrimeField = PrimeField::with_config(q, &config.with_backend(Backend::Scalar)).unwrap();
            for backend in Backend::available() {
                let field: PrimeField = PrimeField::with_config(q, &config.with_backend(backend)).unwrap();
                for n in [1usize, 5, 8, 15, 16, 17, 255] {
                    let a: Vec<u32> = reference.sample_vector(&mut source, n);
                    let b: Vec<u32> = reference.sample_vector(&mut source, n);
                    let mut want: Vec<u32> = vec![0; n];
                    let mut have: Vec<u32> = vec![0; n];

                    reference.va_add_vb_into_vc(&a, &b, &mut want);
                    field.va_add_vb_into_vc(&a, &b, &mut have);
                    assert_eq!(have, want, "add q={q} {backend:?} {reduction:?} n={n}");

                    reference.va_sub_vb_into_vc(&a, &b, &mut want);
                    field.va_sub_vb_into_vc(&a, &b, &mut have);
                    assert_eq!(have, want, "sub q={q} {backend:?} {reduction:?} n={n}");

                    reference.va_mul_vb_into_vc(&a, &b, &mut want);
                    field.va_mul_vb_into_vc(&a, &b, &mut have);
                    assert_eq!(have, want, "mul q={q} {backend:?} {reduction:?} n={n}");

                    reference.va_neg_into_vb(&a, &mut want);
                    field.va_neg_into_vb(&a, &mut have);
                    assert_eq!(have, want, "neg q={q} {backend:?} {reduction:?} n={n}");
                }
            }
        }
    }
}

fn boundary_operands() {
    for q in FERMAT {
        for backend in Backend::available() {
            for reduction in [FermatReduction::Fast, FermatReduction::Safe] {
                let config: Config = Config::default().with_backend(backend).with_fermat_reduction(reduction);
                let field: PrimeField = PrimeField::with_config(q, &config).unwrap();
                let edges: [u32; 4] = [0, 1, q - 2, q - 1];
                let a: Vec<u32> = edges.iter().flat_map(|&x| [x; 4]).collect();
                let b: Vec<u32> = (0..4).flat_map(|_| edges).collect();
                let mut c: Vec<u32> = vec![0; 16];
                field.va_mul_vb_into_vc(&a, &b, &mut c);
                for i in 0..16 {
                    assert_eq!(c[i] as u64, a[i] as u64 * b[i] as u64 % q as u64, "q={q} {backend:?} {reduction:?}");
                }
            }
        }
    }
}

fn canonical_ops_match_field() {
    let mut source: Source = Source::new([1u8; 32]);
    for q in FERMAT.into_iter().chain(GENERIC) {
        let field: PrimeField = PrimeField::new(q);
        let n: usize = 33;
        let a: Vec<u32> = field.sample_vector(&mut source, n);
        let b: Vec<u32> = field.sample_vector(&mut source, n);
        let mut dst: Vec<u32> = vec![0; n];

        field_add_vectors(&mut dst, &a, &b, q);
        (0..n).for_each(|i| assert_eq!(dst[i], field.add(a[i], b[i])));

        field_sub_vectors(&mut dst, &a, &b, q);
        (0..n).for_each(|i| assert_eq!(dst[i], field.sub(a[i], b[i])));

        field_mul_vectors(&mut dst, &a, &b, q);
        (0..n).for_each(|i| assert_eq!(dst[i], field.mul(a[i], b[i])));

        field_mul_vector(&mut dst, &a, b[0], q);
        (0..n).for_each(|i| assert_eq!(dst[i], field.mul(a[i], b[0])));

        dst.copy_from_slice(&a);
        field_neg_vector(&mut dst, q);
        (0..n).for_each(|i| assert_eq!(dst[i], field.neg(a[i])));

        let mut words: Vec<u32> = (0..n).map(|_| source.next_u32n(u32::MAX, u32::MAX)).collect();
        let want: Vec<u32> = words.iter().map(|w| w % q).collect();
        field_mod_vector(&mut words, q);
        assert_eq!(words, want);
    }
}
