//! Build-script entry point: reads the config, regenerates the record file
//! in `OUT_DIR` when its inputs changed, and fails the build if any record
//! could not be generated.
#[macro_export]
macro_rules! build {
    () => {
        $crate::build!("avrogen.toml")
    };

    ($config:expr) => {{
        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", $config);

        $crate::run_build_script($config)
    }};
}
