fn main() {
    // Only the firmware target carries ESP-IDF build metadata.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
