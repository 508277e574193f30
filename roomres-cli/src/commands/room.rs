//! Room inventory: `room add`, `room update`, `room delete`, `room list`,
//! `room show`, `room availability`.

use clap::{Args, Subcommand, ValueEnum};
use roomres::{NewRoom, RoomType};

use crate::error::CliError;
use crate::output::{print_records, FormatArg};
use crate::utils::{current_actor, open_service, print_warnings, GlobalOptions};

/// Manage rooms.
#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    pub action: RoomAction,
}

/// Room subcommands.
#[derive(Subcommand)]
pub enum RoomAction {
    /// Add a room (admin only)
    Add {
        /// Room number as shown on the door
        #[arg(long)]
        number: String,

        /// Building name
        #[arg(long)]
        building: String,

        /// Number of seats
        #[arg(long)]
        capacity: u32,

        /// Room type: classroom, lab or conference
        #[arg(long = "type", value_name = "TYPE", default_value = "classroom")]
        room_type: RoomType,

        /// Free-text equipment list
        #[arg(long)]
        equipment: Option<String>,
    },

    /// Change a room's details (admin only)
    Update {
        /// Room id
        id: i64,

        /// New room number
        #[arg(long)]
        number: Option<String>,

        /// New building name
        #[arg(long)]
        building: Option<String>,

        /// New number of seats
        #[arg(long)]
        capacity: Option<u32>,

        /// New room type
        #[arg(long = "type", value_name = "TYPE")]
        room_type: Option<RoomType>,

        /// New equipment list (empty to clear)
        #[arg(long)]
        equipment: Option<String>,
    },

    /// Delete a room with its classes and past reservations (admin only)
    Delete {
        /// Room id
        id: i64,
    },

    /// List rooms
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Show one room
    Show {
        /// Room id
        id: i64,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Open or close a room for new bookings (admin only)
    Availability {
        /// Room id
        id: i64,

        /// New state
        #[arg(value_enum)]
        state: AvailabilityState,
    },
}

/// Administrative availability of a room.
#[derive(Clone, Copy, ValueEnum)]
pub enum AvailabilityState {
    /// Accept new bookings
    Available,
    /// Refuse new bookings
    Unavailable,
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut service = open_service(global)?;
        let default_format = service.config().output_format();

        match self.action {
            RoomAction::Add {
                number,
                building,
                capacity,
                room_type,
                equipment,
            } => {
                let actor = current_actor(global, &service)?;
                let room = service.add_room(
                    actor,
                    NewRoom {
                        room_number: number,
                        building,
                        capacity,
                        room_type,
                        equipment,
                    },
                )?;
                println!("{}", room.id);
            }
            RoomAction::Update {
                id,
                number,
                building,
                capacity,
                room_type,
                equipment,
            } => {
                let actor = current_actor(global, &service)?;
                let current = service.room(id)?;
                let room = service.update_room(
                    actor,
                    id,
                    NewRoom {
                        room_number: number.unwrap_or(current.room_number),
                        building: building.unwrap_or(current.building),
                        capacity: capacity.unwrap_or(current.capacity),
                        room_type: room_type.unwrap_or(current.room_type),
                        equipment: equipment.or(current.equipment),
                    },
                )?;
                if !global.quiet {
                    eprintln!("Updated room #{}: {}", room.id, room.label());
                }
            }
            RoomAction::Delete { id } => {
                let actor = current_actor(global, &service)?;
                service.delete_room(actor, id)?;
                if !global.quiet {
                    eprintln!("Deleted room #{id}");
                }
            }
            RoomAction::List { format } => {
                let rooms = service.rooms()?;
                print_records(&rooms, format.map_or(default_format, Into::into))?;
            }
            RoomAction::Show { id, format } => {
                let room = service.room(id)?;
                print_records(&[room], format.map_or(default_format, Into::into))?;
            }
            RoomAction::Availability { id, state } => {
                let actor = current_actor(global, &service)?;
                let available = matches!(state, AvailabilityState::Available);
                let result = service.set_room_availability(actor, id, available)?;
                print_warnings(global, &result.warnings);
                if !global.quiet {
                    for action in &result.actions_taken {
                        eprintln!("{action}");
                    }
                }
            }
        }

        Ok(())
    }
}
