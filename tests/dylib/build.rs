fn main() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| String::from("debug"));
    let libname = if cfg!(windows) {
        "easydict_native.dll"
    } else {
        "easydict_native"
    };

    println!("cargo::rustc-link-search=native=target/{profile}/deps");
    println!("cargo::rustc-link-lib=dylib={libname}");
}
