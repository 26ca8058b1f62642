use clap::Parser;

fn main() -> miette::Result<()> {
    askcalc::App::parse().run()
}
