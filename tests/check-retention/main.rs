use std::process::ExitCode;

fn main() -> ExitCode {
    let table = easydict_preload::retained();
    for symbol in table {
        println!("{:<28} {:p}", symbol.name(), symbol.address());
    }

    let report = easydict_preload::check();
    if report.all_resolved() {
        println!("{} symbols retained", report.total);
        ExitCode::SUCCESS
    } else {
        eprintln!("null after linking: {:?}", report.null);
        ExitCode::FAILURE
    }
}
