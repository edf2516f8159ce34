use std::{fmt, fs::File, io, rc::Rc};

use dotenv::dotenv;
use failure::{format_err, Error};
use futures::TryStreamExt as _;
use serde_json::json;
use tracerr::Traced;

use medea_widgets::{
    activity::ActivityStream,
    adapter::{
        json::{Datasource, MeetingsJsonAdapter, RoomsJsonAdapter},
        MeetingsAdapter, RoomsAdapter as _,
    },
    conf::Conf,
    control::ControlRegistry,
    log::{self, prelude::*},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    dotenv().ok();

    let conf = Conf::parse()?;
    let logger = log::new_logger(io::stderr(), conf.log.level());
    let _scope_guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init()?;

    info!("Started with config: {:?}", conf);

    let datasource = if let Some(path) = &conf.datasource.path {
        Datasource::from_reader(io::BufReader::new(File::open(path)?))?
    } else {
        warn!("No datasource configured, nothing to display");
        Datasource::default()
    };
    let meetings = Rc::new(MeetingsJsonAdapter::new(datasource.meetings));
    let rooms = RoomsJsonAdapter::new(datasource.rooms).map_err(traced)?;
    let adapter: Rc<dyn MeetingsAdapter> = meetings.clone();
    let registry =
        ControlRegistry::with_default_controls(adapter, &conf.controls);

    for meeting_id in meetings.meeting_ids() {
        for control_id in registry.ids() {
            let mut displays =
                registry.display(control_id, &meeting_id).map_err(traced)?;
            match displays.try_next().await {
                Ok(Some(display)) => println!(
                    "{}",
                    json!({"meeting": meeting_id, "control": display}),
                ),
                Ok(None) => {}
                Err(e) => {
                    error!(
                        "Control {} failed in meeting {}: {}",
                        control_id,
                        meeting_id,
                        e.as_ref(),
                    );
                    println!(
                        "{}",
                        json!({
                            "meeting": meeting_id,
                            "control": control_id,
                            "error": e.as_ref().to_string(),
                        }),
                    );
                }
            }
        }
    }

    for room_id in rooms.room_ids() {
        let room = rooms
            .get_room(&room_id)
            .try_next()
            .await
            .map_err(traced)?
            .ok_or_else(|| format_err!("Room {} vanished", room_id))?;

        let mut activities = ActivityStream::new();
        activities.extend(
            rooms
                .get_past_activities(&room_id)
                .try_collect::<Vec<_>>()
                .await
                .map_err(traced)?,
        );
        debug!("Room {} has {} activities", room_id, activities.len());

        println!(
            "{}",
            json!({"room": room_id, "view": activities.view(&room)}),
        );
    }

    Ok(())
}

/// Converts the provided [`Traced`] error into a [`failure::Error`] keeping
/// its trace in the message.
fn traced<E: fmt::Display>(err: Traced<E>) -> Error {
    let (err, trace) = err.into_parts();
    format_err!("{}\n{}", err, trace)
}
