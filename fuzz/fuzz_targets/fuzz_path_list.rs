#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the cap, the rest is the stream
    let Some((&cap, stream)) = data.split_first() else {
        return;
    };
    let cap = usize::from(cap);

    let paths = watchrun::read_path_list(stream, cap).expect("reading from a slice cannot fail");
    assert!(paths.len() <= cap);
    assert!(paths.iter().all(|p| !p.contains('\n')));
});
