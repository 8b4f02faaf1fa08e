use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        r#"
__   ___    ____ _____ ____  ____
\ \ / / \  |  _ \_   _|  _ \/ ___|
 \ V / _ \ | |_) || | | |_) \___ \
  | / ___ \|  __/ | | |  _ < ___) |
  |_/_/   \_\_|   |_| |_| \_\____/
"#
        .bright_red()
    );
    println!("{}", "best-effort VAPT sweep".bright_blue());
    println!(
        "{}",
        "only run against systems you are authorized to test".bright_yellow()
    );
    println!();
}
