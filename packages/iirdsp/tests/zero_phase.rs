use iirdsp::{IirError, SosFilter};

fn centred_impulse(len: usize) -> Vec<f64> {
    let mut x = vec![0.0; len];
    x[len / 2] = 1.0;
    x
}

fn assert_symmetric(y: &[f64], tol: f64) {
    let n = y.len();
    for i in 0..n / 2 {
        assert!(
            (y[i] - y[n - 1 - i]).abs() < tol,
            "y[{}] = {} vs y[{}] = {}",
            i,
            y[i],
            n - 1 - i,
            y[n - 1 - i]
        );
    }
}

#[test]
fn test_filtfilt_is_time_symmetric() {
    let mut lp = SosFilter::lowpass(2, 50.0, 500.0).unwrap();
    let mut hp = SosFilter::highpass(2, 50.0, 500.0).unwrap();
    let mut bp = SosFilter::bandpass(2, 20.0, 80.0, 500.0).unwrap();

    assert_symmetric(&lp.filtfilt_vec(&centred_impulse(201)).unwrap(), 1e-9);
    assert_symmetric(&hp.filtfilt_vec(&centred_impulse(201)).unwrap(), 1e-9);
    assert_symmetric(&bp.filtfilt_vec(&centred_impulse(401)).unwrap(), 1e-9);
}

#[test]
fn test_filtfilt_variants_agree() {
    let mut filter = SosFilter::lowpass(4, 30.0, 500.0).unwrap();
    let input: Vec<f64> = (0..300).map(|i| ((i * 7) % 13) as f64 - 6.0).collect();

    let mut output = vec![0.0; input.len()];
    filter.filtfilt(&input, &mut output).unwrap();

    let mut in_place = input.clone();
    filter.filtfilt_in_place(&mut in_place).unwrap();

    assert_eq!(output, in_place);
    assert_eq!(output, filter.filtfilt_vec(&input).unwrap());
}

// Unpadded run over a short buffer: the 0.5 Hz edge rings for far longer
// than 100 samples, so this output is truncated and not time-symmetric.
#[test]
fn test_ecg_bandpass_impulse() {
    let mut filter = SosFilter::bandpass(4, 0.5, 40.0, 500.0).unwrap();
    let mut impulse = vec![0.0; 100];
    impulse[0] = 1.0;

    let out = filter.filtfilt_vec(&impulse).unwrap();
    let peak = out.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    assert!(out.iter().any(|&v| v != 0.0));
    assert!(peak > 0.0 && peak < 0.5, "peak {}", peak);
}

#[test]
fn test_ecg_bandpass_symmetric_when_tails_fit() {
    // The slowest poles decay over roughly 400 samples at 500 Hz; 20000 on
    // each side of the impulse leaves nothing at the buffer edges.
    let mut filter = SosFilter::bandpass(4, 0.5, 40.0, 500.0).unwrap();
    let out = filter.filtfilt_vec(&centred_impulse(40_001)).unwrap();
    assert!(out[20_000].abs() > 1e-3);
    assert_symmetric(&out, 1e-9);
}

#[test]
fn test_length_mismatch_leaves_output_untouched() {
    let mut filter = SosFilter::lowpass(2, 30.0, 500.0).unwrap();
    let input = vec![1.0; 10];
    let mut output = vec![7.0; 9];

    let err = filter.filtfilt(&input, &mut output).unwrap_err();
    assert!(matches!(
        err,
        IirError::LengthMismatch {
            input: 10,
            output: 9
        }
    ));
    assert!(output.iter().all(|&v| v == 7.0));
}

#[test]
fn test_filtfilt_empty_input() {
    let mut filter = SosFilter::highpass(2, 30.0, 500.0).unwrap();
    assert!(filter.filtfilt_vec(&[]).unwrap().is_empty());
}

#[test]
fn test_empty_cascade_passes_through() {
    let mut filter = SosFilter::new();
    let input = vec![0.25, -1.0, 3.5];
    assert_eq!(filter.filter(&input), input);
    assert_eq!(filter.filtfilt_vec(&input).unwrap(), input);
}
