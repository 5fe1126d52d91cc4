fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `protoc` is not available in the build environment, so generation
    // runs from a pre-built descriptor set (../protos/descriptors.bin)
    // produced from the checked-in .proto files. The set contains both
    // coordinator.proto and worker.proto.
    tonic_build::configure()
        .file_descriptor_set_path("../protos/descriptors.bin")
        .skip_protoc_run()
        .compile(
            &["../protos/coordinator.proto", "../protos/worker.proto"],
            &["../protos"],
        )?;
    println!("cargo:rerun-if-changed=../protos/descriptors.bin");
    Ok(())
}
