#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing must never panic, whatever the input
        if let Ok(config) = toml::from_str::<watchrun::Config>(content) {
            let _ = config.with_env_overrides();
        }
    }
});
