pub fn print_banner() {
    println!("courtside v{}", env!("CARGO_PKG_VERSION"));
}
