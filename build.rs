fn main() {
    // The ESP-IDF sysenv hook only applies when the firmware feature is
    // active; host test builds must not require an ESP-IDF install.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
