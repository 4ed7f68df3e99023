// build.rs
#[cfg(windows)]
fn main() {
    use winres::WindowsResource;

    WindowsResource::new()
        .set("ProductName", "Startup Launcher")
        .set("FileDescription", "Launches selected programs at login")
        .compile()
        .unwrap();
}

#[cfg(not(windows))]
fn main() {}
