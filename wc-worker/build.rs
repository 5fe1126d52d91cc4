fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the proto file via `prost`, generating service stubs
    // and proto definitions for use with `tonic`.
    //
    // `protoc` is not available in the build environment, so generation
    // runs from a pre-built descriptor set (../protos/descriptors.bin)
    // produced from the checked-in .proto files.
    tonic_build::configure()
        .file_descriptor_set_path("../protos/descriptors.bin")
        .skip_protoc_run()
        .compile(&["../protos/worker.proto"], &["../protos"])?;
    println!("cargo:rerun-if-changed=../protos/descriptors.bin");
    Ok(())
}
