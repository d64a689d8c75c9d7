fn main() {
    let profiling_enabled = std::env::var_os("CARGO_FEATURE_PROFILING").is_some();
    let tokio_unstable = std::env::var_os("CARGO_CFG_TOKIO_UNSTABLE").is_some();

    if profiling_enabled && !tokio_unstable {
        println!(
            "cargo:warning=evhub-logger `profiling` needs `--cfg tokio_unstable` \
             (RUSTFLAGS=\"--cfg tokio_unstable\"), the console layer stays disabled"
        );
    }

    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PROFILING");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TOKIO_UNSTABLE");
}
