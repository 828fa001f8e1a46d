use clap::Parser;
use stopboard_gtfs::{app::StopboardApp, schedule::ScheduleError};

fn main() -> Result<(), ScheduleError> {
    env_logger::init();
    let args = StopboardApp::parse();
    args.op.run()
}
