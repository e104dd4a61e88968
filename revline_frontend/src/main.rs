fn main() -> Result<(), eframe::Error> {
    revline_frontend::run_frontend()
}
