#![no_main]

use libfuzzer_sys::fuzz_target;
use girscope::{validate_with_config, Typelib, ValidationConfig};

fuzz_target!(|data: &[u8]| {
    let _ = validate_with_config(data, &ValidationConfig::strict());

    if let Ok(typelib) = Typelib::from_mem(data.to_vec()) {
        let _ = typelib.namespace();
        let _ = typelib.dependency_list();
        let _ = typelib.find_some_symbol();
        for entry in typelib.entries() {
            let _ = typelib.entry_name(&entry);
            let _ = typelib.entry_namespace(&entry);
        }
        let _ = typelib.annotations().count();
    }
});
