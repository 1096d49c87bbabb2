use bevy::prelude::*;

use crate::config::{Cli, Mode};
use crate::preludes::combat_preludes::*;
use crate::preludes::network_preludes::*;

const PROTOCOL_ID: u64 = 0;
const MAX_CLIENTS: usize = 10;
const SPAWN_SPACING: f32 = 3.0;

pub struct NetworkPlugin;
impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((RepliconPlugins, RepliconRenetPlugins))
        .init_resource::<Cli>()
        .init_resource::<NetworkRole>()
        .init_resource::<GameplayConfig>()
        .replicate::<Character>()
        .replicate::<Health>()
        .replicate::<Projectile>()
        .replicate::<Transform>()
        .add_client_event::<FireRequest>(Channel::Ordered)
        .add_server_trigger::<PossessCharacter>(Channel::Ordered)
        .add_observer(possess_character)
        .add_observer(spawn_client_character)
        .add_observer(despawn_client_characters)
        .add_systems(Startup, read_cli.map(Result::unwrap))
        .add_systems(PreUpdate, receive_fire_requests
            .after(ServerSet::Receive)
            .run_if(server_running)
        );

        add_request_guard(app, client_connected);
    }
}

fn add_request_guard<M>(app: &mut App, connected: impl Condition<M>) -> &mut App {
    app.add_systems(PostUpdate, drop_unsent_requests
        .before(ClientSet::Send)
        .run_if(is_observer)
        .run_if(not(connected))
    )
}

fn read_cli(
    mut commands: Commands,
    cli: Res<Cli>,
    config: Res<GameplayConfig>,
    channels: Res<RepliconChannels>,
) -> Result<(), Box<dyn Error>> {
    match cli.mode {
        Mode::SinglePlayer => {
            commands.insert_resource(NetworkRole::Authority);
            spawn_host_character(&mut commands, &config);
        }
        Mode::Server { port } => {
            let server = RenetServer::new(ConnectionConfig::from_channels(
                channels.server_configs(),
                channels.client_configs(),
            ));

            let current_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
            let public_addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), port);
            let socket = NativeSocket::new(UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port))?)?;
            let server_config = ServerSetupConfig {
                current_time,
                max_clients: MAX_CLIENTS,
                protocol_id: PROTOCOL_ID,
                authentication: ServerAuthentication::Unsecure,
                socket_addresses: vec![vec![public_addr]],
            };
            let transport = NetcodeServerTransport::new(server_config, socket)?;

            commands.insert_resource(server);
            commands.insert_resource(transport);
            commands.insert_resource(NetworkRole::Authority);

            info!("listening on port {port}");
            spawn_host_character(&mut commands, &config);
        }
        Mode::Client { ip, port } => {
            let client = RenetClient::new(
                ConnectionConfig::from_channels(channels.server_configs(), channels.client_configs()),
                false,
            );

            let current_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
            let client_id = current_time.as_millis() as u64;
            let server_addr = SocketAddr::new(ip, port);
            let socket = NativeSocket::new(UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?)?;
            let authentication = ClientAuthentication::Unsecure {
                client_id,
                protocol_id: PROTOCOL_ID,
                socket_id: 0,
                server_addr,
                user_data: None,
            };
            let transport = NetcodeClientTransport::new(current_time, authentication, socket)?;

            commands.insert_resource(client);
            commands.insert_resource(transport);
            commands.insert_resource(NetworkRole::Observer);

            info!("connecting to {server_addr} as {client_id}");
        }
    }

    Ok(())
}

fn spawn_host_character(commands: &mut Commands, config: &GameplayConfig) {
    commands.spawn((
        CharacterBundle::new("Host".into(), config, Vec3::ZERO),
        LocalPlayer,
        OwnedBy(SERVER),
    ));
}

fn spawn_client_character(
    trigger: Trigger<OnAdd, ConnectedClient>,
    role: Res<NetworkRole>,
    config: Res<GameplayConfig>,
    characters: Query<(), With<Character>>,
    mut commands: Commands,
) {
    if !role.is_authoritative() {
        return;
    }

    let client_entity = trigger.target();
    let slot = characters.iter().count() as f32;
    let character = commands
        .spawn((
            CharacterBundle::new(
                format!("Player {client_entity}"),
                &config,
                Vec3::X * SPAWN_SPACING * slot,
            ),
            OwnedBy(client_entity),
        ))
        .id();

    info!("{client_entity} connected, controls {character}");

    commands.server_trigger_targets(
        ToClients {
            mode: SendMode::Direct(client_entity),
            event: PossessCharacter,
        },
        character,
    );
}

fn despawn_client_characters(
    trigger: Trigger<OnRemove, ConnectedClient>,
    characters: Query<(Entity, &OwnedBy)>,
    mut commands: Commands,
) {
    let client_entity = trigger.target();
    info!("{client_entity} disconnected");

    for (character, owner) in &characters {
        if owner.0 == client_entity {
            commands.entity(character).try_despawn();
        }
    }
}

fn possess_character(trigger: Trigger<PossessCharacter>, mut commands: Commands) {
    debug!("possessing {}", trigger.target());
    commands.entity(trigger.target()).try_insert(LocalPlayer);
}

/// Turns fire requests from remote clients into orders for the character each client owns.
fn receive_fire_requests(
    mut commands: Commands,
    mut requests: EventReader<FromClient<FireRequest>>,
    characters: Query<(Entity, &OwnedBy), With<Character>>,
) {
    for FromClient { client_entity, event } in requests.read() {
        let Some((character, _)) = characters
            .iter()
            .find(|(_, owner)| owner.0 == *client_entity)
        else {
            warn!("{client_entity} sent {event:?} without a character");
            continue;
        };

        commands.trigger_targets(FireOrder(event.0), character);
    }
}

fn drop_unsent_requests(mut requests: ResMut<Events<FireRequest>>) {
    for request in requests.drain() {
        warn!("not connected to a server, dropping {request:?}");
    }
}
