// ABOUTME: Build script for generating Rust code from helloworld.proto.
// ABOUTME: Uses tonic-build to compile protobuf definitions into Rust types.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/helloworld.proto"], &["proto"])?;

    // Rerun if the proto file changes
    println!("cargo:rerun-if-changed=proto/helloworld.proto");

    Ok(())
}
