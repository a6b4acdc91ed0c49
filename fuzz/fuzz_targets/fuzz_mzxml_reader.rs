#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Reading the index and every indexed scan must fail gracefully, never panic
    let Ok(mut reader) = mzxml_diff::mzxml::MzXmlReader::new(Cursor::new(data), "fuzz") else {
        return;
    };

    let scans: Vec<u32> = reader.index().offsets.keys().copied().take(100).collect();
    for scan_number in scans {
        if let Ok((_header, peaks)) = reader.read_scan(scan_number) {
            let _ = peaks.without_zero_intensity();
        }
    }
});
