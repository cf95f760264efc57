//! Roster session
//!
//! A [`RosterSession`] owns the handle to the game, the table resolvers and
//! the latest [`RosterSnapshot`]. It has no internal locking: callers
//! serialize access, or share it through [`SharedRoster`].

mod bulk;
mod shared;
mod snapshot;

pub use bulk::{ShuffleReport, SHUFFLE_ROSTER_SIZE};
pub use shared::SharedRoster;
pub use snapshot::RosterSnapshot;

use crate::accessor::{
    apply_edits, decode_value, encode_value, BatchEdit, BatchReport, CopyBlock, FieldAccessor,
    FieldValue, TEAM_TEXT_FIELDS,
};
use crate::config::{Config, OffsetMap};
use crate::core::types::{
    Address, FieldDescriptor, MemoryError, MemoryResult, Player, ProcessId, Slot,
};
use crate::import::{merge_rows, ImportSummary};
use crate::index::{derive_teams_from_players, sorted_team_labels, EntityIndex};
use crate::memory::{ForeignMemory, MemoryReadExt, ProcessLocator};
use crate::resolver::{validate_player_table, validate_team_table, TableResolver};
use crate::scanner::heuristics::label_order;
use crate::scanner::{scan_players, scan_team_roster, scan_teams, ScanOutcome};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Live editing session against one game process
pub struct RosterSession<M: ForeignMemory> {
    memory: M,
    pid: ProcessId,
    module_base: Address,
    config: Config,
    offsets: OffsetMap,
    players: TableResolver,
    teams: TableResolver,
    snapshot: Arc<RosterSnapshot>,
    generation: u64,
}

impl<M: ForeignMemory> RosterSession<M> {
    /// Finds the configured process, opens it and locates its module.
    ///
    /// Nothing is scanned until [`refresh`](Self::refresh).
    pub fn attach<L>(locator: &L, config: Config, offsets: OffsetMap) -> MemoryResult<Self>
    where
        L: ProcessLocator<Memory = M>,
    {
        let pid = locator.find_process(&config.process.name)?;
        let memory = locator.open(pid)?;
        let module_base = locator.module_base(&memory, &config.process.module)?;
        info!(
            "Attached to {} (pid {}), module base {}",
            config.process.name, pid, module_base
        );
        Ok(Self::from_parts(memory, pid, module_base, config, offsets))
    }

    /// Builds a session over an already opened process
    pub fn from_parts(
        memory: M,
        pid: ProcessId,
        module_base: Address,
        config: Config,
        offsets: OffsetMap,
    ) -> Self {
        let players = config.players.resolver();
        let teams = config.teams.resolver();
        RosterSession {
            memory,
            pid,
            module_base,
            config,
            offsets,
            players,
            teams,
            snapshot: Arc::new(RosterSnapshot::empty(0)),
            generation: 0,
        }
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn module_base(&self) -> Address {
        self.module_base
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn offsets(&self) -> &OffsetMap {
        &self.offsets
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<RosterSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Forgets both resolved bases; the next refresh resolves again
    pub fn invalidate(&mut self) {
        self.players.invalidate();
        self.teams.invalidate();
    }

    /// Forgets the cached bases and refreshes, for after the game restarted
    /// or a roster was reloaded
    pub fn rescan(&mut self) -> Arc<RosterSnapshot> {
        self.invalidate();
        self.refresh()
    }

    /// Resolves both tables, rescans and publishes a new snapshot.
    ///
    /// Unresolved or rejected player data yields an empty snapshot. When the
    /// team table is unavailable, teams are derived from player pointers.
    pub fn refresh(&mut self) -> Arc<RosterSnapshot> {
        self.generation += 1;
        let snapshot = match self.scan() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Refresh aborted: {}", e);
                self.invalidate();
                RosterSnapshot::empty(self.generation)
            }
        };
        info!(
            "Snapshot {}: {} players, {} teams{}",
            snapshot.generation,
            snapshot.players.len(),
            snapshot.team_labels.len(),
            if snapshot.derived_teams { " (derived)" } else { "" }
        );
        self.snapshot = Arc::new(snapshot);
        self.snapshot()
    }

    /// Fatal faults are returned; everything else degrades the snapshot
    fn scan(&mut self) -> MemoryResult<RosterSnapshot> {
        let memory: &dyn ForeignMemory = &self.memory;
        let player_layout = self.config.players.layout;
        let team_layout = self.config.teams.layout;

        let player_base = self.players.resolve(memory, self.module_base, |m, c| {
            validate_player_table(m, c, &player_layout)
        });
        let team_base = self.teams.resolve(memory, self.module_base, |m, c| {
            validate_team_table(m, c, &team_layout)
        });

        let mut snapshot = RosterSnapshot {
            generation: self.generation,
            player_base,
            team_base,
            ..Default::default()
        };
        let Some(base) = player_base else {
            return Ok(snapshot);
        };

        let mut players = match scan_players(
            memory,
            base,
            &player_layout,
            &team_layout,
            player_layout.max_slots,
        ) {
            ScanOutcome::Complete(players) => players,
            ScanOutcome::Rejected(reason) => {
                warn!("Player table at {} rejected: {}", base, reason);
                self.players.invalidate();
                snapshot.player_base = None;
                return Ok(snapshot);
            }
            ScanOutcome::Aborted(e) => return Err(e),
        };

        let mut teams = match team_base {
            Some(team_base) => {
                match scan_teams(memory, team_base, &team_layout, team_layout.max_slots) {
                    ScanOutcome::Complete(teams) => teams,
                    ScanOutcome::Rejected(reason) => {
                        warn!("Team table at {} rejected: {}", team_base, reason);
                        Vec::new()
                    }
                    ScanOutcome::Aborted(e) => return Err(e),
                }
            }
            None => Vec::new(),
        };

        if teams.is_empty() {
            debug!("Deriving teams from player team pointers");
            let (_, labels) = derive_teams_from_players(&mut players);
            snapshot.team_labels = labels;
            snapshot.derived_teams = true;
        } else {
            teams.sort_by(|a, b| label_order(&a.label, &b.label));
            let labels: HashMap<Address, &str> =
                teams.iter().map(|t| (t.address, t.label.as_str())).collect();
            for player in players.iter_mut() {
                if let Some(label) = labels.get(&player.team_ptr) {
                    player.team = label.to_string();
                }
            }
            snapshot.team_labels = sorted_team_labels(teams.iter().map(|t| t.label.clone()));
        }

        snapshot.index = EntityIndex::build(&players, &teams, Some(base), &player_layout);
        snapshot.players = players;
        snapshot.teams = teams;
        Ok(snapshot)
    }

    fn player_accessor(&self) -> MemoryResult<FieldAccessor<'_>> {
        let base = self
            .snapshot
            .player_base
            .ok_or_else(|| MemoryError::table_unresolved(self.players.table()))?;
        Ok(FieldAccessor::new(
            &self.memory,
            base,
            self.config.players.layout.stride,
        ))
    }

    fn team_accessor(&self) -> MemoryResult<FieldAccessor<'_>> {
        let base = self
            .snapshot
            .team_base
            .ok_or_else(|| MemoryError::table_unresolved(self.teams.table()))?;
        Ok(FieldAccessor::new(&self.memory, base, self.config.teams.layout.stride))
    }

    /// Players listed under a team label in the current snapshot
    pub fn players_by_team(&self, label: &str) -> Vec<Player> {
        self.snapshot
            .players_by_team(label)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Decodes one field of a player
    pub fn get_field(&self, slot: Slot, field: &FieldDescriptor) -> MemoryResult<FieldValue> {
        let raw = self.player_accessor()?.get_field(slot, field.span)?;
        Ok(decode_value(field, raw, &self.config.ratings))
    }

    /// Encodes and writes one field of a player
    pub fn set_field(
        &self,
        slot: Slot,
        field: &FieldDescriptor,
        value: &FieldValue,
    ) -> MemoryResult<()> {
        let accessor = self.player_accessor()?;
        let raw = encode_value(field, value, &self.config.ratings)?;
        accessor.set_field(slot, field.span, raw)
    }

    /// Applies edits field by field, resolving selectors against the snapshot
    pub fn apply_batch(&self, edits: &[BatchEdit]) -> MemoryResult<BatchReport> {
        let accessor = self.player_accessor()?;
        let snapshot = self.snapshot();
        let report = apply_edits(&accessor, edits, &self.config.ratings, |selector| {
            snapshot.select(selector)
        });
        info!(
            "Batch of {} edits: {} players updated, {} failed",
            edits.len(),
            report.entities_updated,
            report.failures()
        );
        Ok(report)
    }

    /// Merges import rows into one category of the offset map
    pub fn import_rows(
        &self,
        category: &str,
        header: &[String],
        rows: &[Vec<String>],
    ) -> MemoryResult<ImportSummary> {
        let fields = self
            .offsets
            .category(category)
            .ok_or_else(|| MemoryError::InvalidField(format!("unknown category {}", category)))?;
        let accessor = self.player_accessor()?;
        let snapshot = self.snapshot();
        Ok(merge_rows(
            &accessor,
            category,
            &fields.fields,
            header,
            rows,
            &self.config.ratings,
            |name| snapshot.index.lookup_by_name(name),
        ))
    }

    /// Writes a player's names and face id back to its record
    pub fn update_player(&self, player: &Player) -> MemoryResult<()> {
        let accessor = self.player_accessor()?;
        let layout = &self.config.players.layout;
        let record = accessor.record(player.slot);
        let memory: &dyn ForeignMemory = &self.memory;
        memory.write_wide_string(
            record.offset(layout.last_name_offset),
            &player.last_name,
            layout.name_max_chars,
        )?;
        memory.write_wide_string(
            record.offset(layout.first_name_offset),
            &player.first_name,
            layout.name_max_chars,
        )?;
        accessor.set_u32(player.slot, layout.face_id_offset, player.face_id)?;
        debug!("Updated player {} ({})", player.slot, player.full_name());
        Ok(())
    }

    /// Copies whole blocks of one player record onto another
    pub fn copy_player_blocks(&self, src: Slot, dst: Slot, blocks: &[CopyBlock]) -> MemoryResult<()> {
        let accessor = self.player_accessor()?;
        let count = self.snapshot.players.len();
        for slot in [src, dst] {
            if slot as usize >= count {
                return Err(MemoryError::SlotOutOfRange { slot, count });
            }
        }
        let stride = accessor.stride();
        for block in blocks {
            let (offset, len) = block.range(stride);
            accessor.copy_bytes(src, dst, offset, len)?;
            debug!("Copied {} block from slot {} to {}", block, src, dst);
        }
        Ok(())
    }

    fn check_team_slot(&self, slot: Slot) -> MemoryResult<()> {
        let count = self.config.teams.layout.max_slots as usize;
        if slot as usize >= count {
            return Err(MemoryError::SlotOutOfRange { slot, count });
        }
        Ok(())
    }

    /// Reads every editable text field of a team record
    pub fn team_fields(&self, slot: Slot) -> MemoryResult<Vec<(&'static str, String)>> {
        self.check_team_slot(slot)?;
        let accessor = self.team_accessor()?;
        TEAM_TEXT_FIELDS
            .iter()
            .map(|field| Ok((field.name, accessor.get_text(slot, field)?)))
            .collect()
    }

    /// Writes team text fields by name; returns how many were written.
    ///
    /// Unknown names are rejected before anything is written. A failed
    /// write is logged and the remaining fields are still attempted.
    pub fn set_team_fields(&self, slot: Slot, values: &[(&str, &str)]) -> MemoryResult<usize> {
        self.check_team_slot(slot)?;
        let accessor = self.team_accessor()?;
        let mut resolved = Vec::with_capacity(values.len());
        for (name, value) in values {
            let field = TEAM_TEXT_FIELDS
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| MemoryError::InvalidField(format!("team field {}", name)))?;
            resolved.push((field, *value));
        }

        let mut written = 0;
        for (field, value) in resolved {
            match accessor.set_text(slot, field, value) {
                Ok(()) => written += 1,
                Err(e) => warn!("Failed to write {} of team slot {}: {}", field.name, slot, e),
            }
        }
        Ok(written)
    }

    /// Decodes the roster of the team shown under `label`
    pub fn team_roster(&self, label: &str) -> MemoryResult<Vec<Player>> {
        let snapshot = self.snapshot();
        let team = snapshot
            .team(label)
            .ok_or_else(|| MemoryError::EntityNotFound(format!("team {:?}", label)))?;
        let base = snapshot
            .player_base
            .ok_or_else(|| MemoryError::table_unresolved(self.players.table()))?;
        scan_team_roster(&self.memory, team, base, &self.config.players.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BitSpan, FREE_AGENTS};
    use crate::memory::{MockMemory, MockProcessLocator};
    use crate::resolver::PointerChain;

    const MODULE: Address = Address::new(0x1_4000_0000);
    const PLAYERS: Address = Address::new(0x2000_0000);
    const TEAMS: Address = Address::new(0x3000_0000);
    const PLAYER_RVA: u64 = 0x100;
    const TEAM_RVA: u64 = 0x200;

    fn config() -> Config {
        let mut config = Config::default();
        config.players.chains = vec![PointerChain::new(PLAYER_RVA, 0, false)];
        config.players.static_rva = None;
        config.players.layout.max_slots = 4;
        config.teams.chains = vec![PointerChain::new(TEAM_RVA, 0, false)];
        config.teams.layout.max_slots = 2;
        config
    }

    fn put_player(memory: &MockMemory, config: &Config, slot: u32, first: &str, last: &str, team: Address) {
        let layout = &config.players.layout;
        let record = layout.record(PLAYERS, slot);
        memory.poke_wide(record.offset(layout.first_name_offset), first, layout.name_max_chars);
        memory.poke_wide(record.offset(layout.last_name_offset), last, layout.name_max_chars);
        memory.poke_u32(record.offset(layout.face_id_offset), 100 + slot);
        memory.poke_u64(record.offset(layout.team_ptr_offset), team.as_u64());
    }

    fn put_team(memory: &MockMemory, config: &Config, slot: u32, name: &str) -> Address {
        let layout = &config.teams.layout;
        let record = layout.record(TEAMS, slot);
        memory.poke_wide(record.offset(layout.name_offset), name, layout.name_max_chars);
        record
    }

    fn game(with_teams: bool) -> (MockMemory, Config) {
        let config = config();
        let memory = MockMemory::new();
        memory.map(MODULE, 0x1000);
        memory.map(PLAYERS, (config.players.layout.stride * 4) as usize);
        memory.poke_u64(MODULE.offset(PLAYER_RVA), PLAYERS.as_u64());

        let mut celtics = Address::new(0x5000_0000);
        let mut lakers = Address::new(0x6000_0000);
        if with_teams {
            memory.map(TEAMS, (config.teams.layout.stride * 2) as usize);
            memory.poke_u64(MODULE.offset(TEAM_RVA), TEAMS.as_u64());
            lakers = put_team(&memory, &config, 0, "Lakers");
            celtics = put_team(&memory, &config, 1, "Celtics");
        } else {
            for (ptr, name) in [(celtics, "Celtics"), (lakers, "Lakers")] {
                memory.map(ptr, 0x400);
                memory.poke_wide(ptr.offset(config.teams.layout.name_offset), name, 24);
            }
        }

        put_player(&memory, &config, 0, "John", "Doe", Address::null());
        put_player(&memory, &config, 1, "Anthony", "Davis", lakers);
        put_player(&memory, &config, 2, "Jayson", "Tatum", celtics);
        (memory, config)
    }

    fn session(memory: &MockMemory, config: Config) -> RosterSession<MockMemory> {
        RosterSession::from_parts(memory.clone(), 1, MODULE, config, OffsetMap::builtin())
    }

    #[test]
    fn test_attach() {
        let (memory, config) = game(true);
        let locator = MockProcessLocator::new(memory)
            .with_process("NBA2K25.exe", 77)
            .with_module("nba2k25.exe", MODULE);
        let session = RosterSession::attach(&locator, config.clone(), OffsetMap::builtin()).unwrap();
        assert_eq!(session.pid(), 77);
        assert_eq!(session.module_base(), MODULE);
        assert_eq!(session.snapshot().generation, 0);

        let locator = MockProcessLocator::new(MockMemory::new());
        let result = RosterSession::attach(&locator, config, OffsetMap::builtin());
        assert!(matches!(result, Err(MemoryError::ProcessNotFound(_))));
    }

    #[test]
    fn test_refresh_with_team_table() {
        let (memory, config) = game(true);
        let mut session = session(&memory, config);
        let snapshot = session.refresh();

        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.player_base, Some(PLAYERS));
        assert_eq!(snapshot.team_base, Some(TEAMS));
        assert!(!snapshot.derived_teams);
        assert_eq!(snapshot.players.len(), 3);
        let labels: Vec<&str> = snapshot.teams.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Celtics", "Lakers"]);
        assert_eq!(snapshot.player(0).unwrap().team, FREE_AGENTS);
        assert_eq!(snapshot.player(1).unwrap().team, "Lakers");
        assert_eq!(session.players_by_team("Celtics")[0].last_name, "Tatum");
    }

    #[test]
    fn test_refresh_derives_teams_without_team_table() {
        let (memory, config) = game(false);
        let mut session = session(&memory, config);
        let snapshot = session.refresh();

        assert!(snapshot.derived_teams);
        assert_eq!(snapshot.team_base, None);
        let labels: Vec<&str> = snapshot.team_labels.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["Celtics", "Free Agents", "Lakers"]);
        assert_eq!(snapshot.player(2).unwrap().team, "Celtics");
    }

    #[test]
    fn test_unresolved_player_table() {
        let memory = MockMemory::new();
        memory.map(MODULE, 0x1000);
        let mut session = session(&memory, config());
        let snapshot = session.refresh();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.player_base, None);

        let speed = FieldDescriptor::new("Attributes", "Speed", BitSpan::new(0x3A0, 0, 8), None);
        let result = session.get_field(0, &speed);
        assert!(matches!(result, Err(MemoryError::TableUnresolved(_))));
    }

    #[test]
    fn test_process_exit_yields_empty_snapshot() {
        let (memory, config) = game(true);
        let mut session = session(&memory, config);
        assert_eq!(session.refresh().players.len(), 3);

        memory.terminate(1);
        let snapshot = session.refresh();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.generation, 2);
    }

    #[test]
    fn test_rescan_follows_moved_table() {
        let (memory, config) = game(true);
        let stride = config.players.layout.stride as usize;
        let mut session = session(&memory, config);
        assert_eq!(session.refresh().player_base, Some(PLAYERS));

        let moved = Address::new(0x2800_0000);
        memory.map(moved, stride);
        memory.poke_wide(moved, "Moved", 20);
        memory.poke_u64(MODULE.offset(PLAYER_RVA), moved.as_u64());

        // cached base survives a plain refresh
        assert_eq!(session.refresh().player_base, Some(PLAYERS));
        let snapshot = session.rescan();
        assert_eq!(snapshot.player_base, Some(moved));
        assert_eq!(snapshot.players[0].last_name, "Moved");
    }

    #[test]
    fn test_field_round_trip() {
        let (memory, config) = game(true);
        let mut session = session(&memory, config);
        session.refresh();

        let speed = FieldDescriptor::new("Attributes", "Speed", BitSpan::new(0x3A0, 1, 7), None);
        session.set_field(1, &speed, &FieldValue::Number(88.0)).unwrap();
        assert_eq!(session.get_field(1, &speed).unwrap(), FieldValue::Number(88.0));

        let no_trade = session.offsets().field("Contract", "No Trade").unwrap().clone();
        session.set_field(1, &no_trade, &"yes".into()).unwrap();
        assert_eq!(session.get_field(1, &no_trade).unwrap(), FieldValue::Label("Yes".into()));
    }

    #[test]
    fn test_update_player() {
        let (memory, config) = game(true);
        let layout = config.players.layout;
        let mut session = session(&memory, config);
        let snapshot = session.refresh();

        let mut player = snapshot.player(2).unwrap().clone();
        player.first_name = "JT".to_string();
        player.face_id = 4242;
        session.update_player(&player).unwrap();

        let record = layout.record(PLAYERS, 2);
        assert_eq!(
            memory
                .read_wide_string(record.offset(layout.first_name_offset), 20)
                .unwrap(),
            "JT"
        );
        assert_eq!(memory.read_u32(record.offset(layout.face_id_offset)).unwrap(), 4242);
        assert_eq!(session.refresh().player(2).unwrap().full_name(), "JT Tatum");
    }

    #[test]
    fn test_copy_player_blocks() {
        let (memory, config) = game(true);
        let layout = config.players.layout;
        let mut session = session(&memory, config);
        session.refresh();

        let src = layout.record(PLAYERS, 1);
        memory.poke(src.offset(0x392), &[7; 53]);
        session
            .copy_player_blocks(1, 2, &[CopyBlock::Attributes])
            .unwrap();
        let dst = layout.record(PLAYERS, 2);
        assert_eq!(memory.peek(dst.offset(0x392), 53).unwrap(), vec![7; 53]);
        // names untouched
        assert_eq!(session.refresh().player(2).unwrap().last_name, "Tatum");

        let result = session.copy_player_blocks(1, 3, &[CopyBlock::Full]);
        assert!(matches!(
            result,
            Err(MemoryError::SlotOutOfRange { slot: 3, count: 3 })
        ));
    }

    #[test]
    fn test_team_fields() {
        let (memory, config) = game(true);
        let mut session = session(&memory, config);
        session.refresh();

        let fields = session.team_fields(0).unwrap();
        assert_eq!(fields.len(), TEAM_TEXT_FIELDS.len());
        assert_eq!(fields[0], ("Team Name", "Lakers".to_string()));

        let written = session
            .set_team_fields(0, &[("arena name", "Crypto.com Arena"), ("State Short Name", "CA")])
            .unwrap();
        assert_eq!(written, 2);
        let fields = session.team_fields(0).unwrap();
        assert_eq!(fields[4].1, "Crypto.com Arena");
        assert_eq!(fields[3].1, "CA");

        assert!(matches!(
            session.set_team_fields(0, &[("Mascot", "Bear")]),
            Err(MemoryError::InvalidField(_))
        ));
        assert!(matches!(
            session.team_fields(2),
            Err(MemoryError::SlotOutOfRange { .. })
        ));
    }

    #[test]
    fn test_team_roster() {
        let (memory, config) = game(true);
        let player_layout = config.players.layout;
        let team_layout = config.teams.layout;
        memory.poke_u64(
            team_layout.record(TEAMS, 0),
            player_layout.record(PLAYERS, 1).as_u64(),
        );
        let mut session = session(&memory, config);
        session.refresh();

        let roster = session.team_roster("Lakers").unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].last_name, "Davis");
        assert!(matches!(
            session.team_roster("Bulls"),
            Err(MemoryError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_apply_batch_and_import() {
        let (memory, config) = game(true);
        let mut session = session(&memory, config);
        session.refresh();

        let years_left = session.offsets().field("Contract", "Years Left").unwrap().clone();
        let report = session
            .apply_batch(&[BatchEdit {
                selector: crate::accessor::EntitySelector::Team("Lakers".into()),
                field: years_left.clone(),
                value: FieldValue::Number(3.0),
            }])
            .unwrap();
        assert_eq!(report.entities_updated, 1);
        assert_eq!(session.get_field(1, &years_left).unwrap(), FieldValue::Number(3.0));

        let header = vec!["Player".to_string(), "Years Left".to_string()];
        let rows = vec![vec!["Jayson Tatum".to_string(), "100".to_string()]];
        let summary = session.import_rows("Contract", &header, &rows).unwrap();
        assert_eq!(summary.players_updated, 1);
        assert_eq!(session.get_field(2, &years_left).unwrap(), FieldValue::Number(31.0));

        assert!(matches!(
            session.import_rows("Shoes", &header, &rows),
            Err(MemoryError::InvalidField(_))
        ));
    }
}
