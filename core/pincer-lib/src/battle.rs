//! battle.rs：
//! - 戰鬥流程的單一入口（Battle）：持有棋盤、定義目錄、規則設定、回合控制器與拖曳狀態。
//! - 負責把輸入手勢、計時 tick、技能施放轉成對棋盤的修改，並累積事件給表現層取走。
//! - 所有錯誤都在這裡以 warn 記錄後回傳，回傳錯誤時狀態不會被修改。
use crate::*;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Battle {
    pub board: Board,
    pub catalog: Catalog,
    pub config: RulesConfig,
    turn: TurnController,
    session: Option<MoveSession>,
    memo: PushMemo,
    events: Vec<Event>,
}

impl Battle {
    pub fn new(board: Board, catalog: Catalog, config: RulesConfig) -> Self {
        let turn = TurnController::new(&config);
        Battle {
            board,
            catalog,
            config,
            turn,
            session: None,
            memo: PushMemo::default(),
            events: Vec::new(),
        }
    }

    pub fn from_definitions(
        level: &LevelDefinition,
        team: &TeamDefinition,
        catalog: Catalog,
        config: RulesConfig,
    ) -> Self {
        let board = board_from_definitions(level, team, &catalog);
        Self::new(board, catalog, config)
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn.state()
    }

    pub fn phase(&self) -> &TurnPhase {
        self.turn.phase()
    }

    pub fn session(&self) -> Option<&MoveSession> {
        self.session.as_ref()
    }

    pub fn push_memo(&self) -> &PushMemo {
        &self.memo
    }

    /// 取走目前累積的事件
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn handle_gesture(&mut self, gesture: InputGesture) -> Result<(), Error> {
        match gesture {
            InputGesture::Start { unit_id, at } => {
                self.begin_move(&unit_id)?;
                self.move_to(&unit_id, at).map(|_| ())
            }
            InputGesture::Move { at } => {
                let unit_id = self.require_active("Battle::handle_gesture")?;
                self.move_to(&unit_id, at).map(|_| ())
            }
            InputGesture::End { at } => self.release(at).map(|_| ()),
        }
    }

    /// Idle → Active：開始拖曳指定單位
    pub fn begin_move(&mut self, unit_id: &str) -> Result<(), Error> {
        let func = "Battle::begin_move";
        let result = self.try_begin_move(func, unit_id);
        logged(func, result)
    }

    fn try_begin_move(&mut self, func: &'static str, unit_id: &str) -> Result<(), Error> {
        let unit = self.board.unit(unit_id).ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: unit_id.to_string(),
        })?;
        // 只有玩家可以拖曳
        if !unit.is_player() {
            return Err(Error::NotMovable {
                func,
                unit_id: unit_id.to_string(),
            });
        }
        let pos = unit.pos;
        self.turn.begin(unit_id)?;
        self.memo.clear();
        self.session = Some(MoveSession::new(unit_id.to_string(), pos));
        info!(unit_id, ?pos, "turn started");
        Ok(())
    }

    /// 行動中單位的一次位置更新
    pub fn move_to(&mut self, unit_id: &str, destination: Pos) -> Result<StepOutcome, Error> {
        let func = "Battle::move_to";
        let result = self.try_move_to(func, unit_id, destination);
        logged(func, result)
    }

    fn try_move_to(
        &mut self,
        func: &'static str,
        unit_id: &str,
        destination: Pos,
    ) -> Result<StepOutcome, Error> {
        self.check_active(func, unit_id)?;
        let session = self
            .session
            .as_mut()
            .ok_or(Error::NoActiveUnit { func })?;
        advance(
            &mut self.board,
            &mut self.memo,
            self.config.push_rule,
            session,
            destination,
            &mut self.events,
        )
    }

    /// 放開行動中的單位；有位置時先移動到該格，接著確認最終位置並鎖定回合
    pub fn release(&mut self, at: Option<Pos>) -> Result<TurnEndReason, Error> {
        let func = "Battle::release";

        let unit_id = logged(func, self.require_active(func))?;
        if let Some(at) = at {
            self.move_to(&unit_id, at)?;
        }
        let result = self.try_release(func);
        logged(func, result)
    }

    fn try_release(&mut self, func: &'static str) -> Result<TurnEndReason, Error> {
        let session = self.session.as_ref().ok_or(Error::NoActiveUnit { func })?;
        let conflict = settle(&mut self.board, session, &mut self.events)?;
        let reason = if conflict {
            TurnEndReason::Conflict
        } else {
            TurnEndReason::ManualDrop
        };
        self.end_turn(reason)?;
        Ok(reason)
    }

    /// 推進一個計時 tick；時間到時退回最後安全位置並鎖定回合，回傳是否因此鎖定
    pub fn tick(&mut self) -> bool {
        if !self.turn.tick() {
            return false;
        }
        match self.expire() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "timeout handling failed");
                false
            }
        }
    }

    pub fn pause(&mut self) {
        self.turn.pause();
        debug!(state = ?self.turn.state(), "countdown paused");
    }

    pub fn resume(&mut self) {
        self.turn.resume();
        debug!(state = ?self.turn.state(), "countdown resumed");
    }

    /// Locked → Idle，所有單位重新可以移動
    pub fn next_round(&mut self) -> Result<(), Error> {
        let func = "Battle::next_round";

        let result = self.turn.reset().map(|changed| {
            if changed {
                self.session = None;
                self.events.push(Event::TurnReset);
                info!("next round");
            }
        });
        logged(func, result)
    }

    /// 施放技能，行動中不可施放
    pub fn use_ability(&mut self, caster_id: &str, ability_id: &str) -> Result<(), Error> {
        let func = "Battle::use_ability";

        let result = self.try_use_ability(func, caster_id, ability_id);
        logged(func, result)
    }

    fn try_use_ability(
        &mut self,
        func: &'static str,
        caster_id: &str,
        ability_id: &str,
    ) -> Result<(), Error> {
        if let Some(active) = self.turn.active_unit() {
            return Err(Error::TurnInProgress {
                func,
                unit_id: active.clone(),
            });
        }
        if self.board.unit(caster_id).is_none() {
            return Err(Error::UnitNotFound {
                func,
                unit_id: caster_id.to_string(),
            });
        }
        use_ability_by_id(
            &mut self.board,
            &self.catalog,
            caster_id,
            ability_id,
            &mut self.events,
        )
    }

    /// 加入首領（2x2），越界時夾回棋盤，與其他單位重疊則拒絕
    pub fn spawn_boss(&mut self, def: &BossDefinition) -> Result<(), Error> {
        let func = "Battle::spawn_boss";

        let mut unit = Unit::boss(def);
        let clamped = clamp_anchor(unit.pos, unit.width, unit.height);
        if clamped != unit.pos {
            warn!(unit_id = %unit.id, pos = ?unit.pos, ?clamped, "boss out of bounds, clamped");
            unit.pos = clamped;
        }
        let pos = unit.pos;
        let result = self.board.insert_unit(unit);
        if result.is_ok() {
            info!(unit_id = %def.id, ?pos, "boss spawned");
        }
        logged(func, result)
    }

    /// 時間到：退回最後安全位置後鎖定
    fn expire(&mut self) -> Result<(), Error> {
        if let Some(session) = self.session.as_ref() {
            revert_to_safe(&mut self.board, session, &mut self.events)?;
        }
        self.end_turn(TurnEndReason::Timeout)
    }

    /// Active → Locked，接著進行夾擊判定與攻擊連鎖
    fn end_turn(&mut self, reason: TurnEndReason) -> Result<(), Error> {
        let unit_id = self.turn.lock()?;
        self.session = None;
        self.events.push(Event::TurnEnded { reason });
        info!(unit_id = %unit_id, %reason, "turn ended");

        for pincer in find_pincers(&self.board) {
            info!(
                enemy = %pincer.enemy,
                ally_a = %pincer.ally_a,
                ally_b = %pincer.ally_b,
                "pincer"
            );
            self.events.push(Event::PincerTriggered {
                enemy: pincer.enemy.clone(),
                ally_a: pincer.ally_a.clone(),
                ally_b: pincer.ally_b.clone(),
            });
            run_attack_chain(
                &mut self.board,
                &self.catalog,
                &[pincer.ally_a, pincer.ally_b],
                &pincer.enemy,
                &mut self.events,
            );
        }
        Ok(())
    }

    fn require_active(&self, func: &'static str) -> Result<UnitID, Error> {
        match self.turn.phase() {
            TurnPhase::Active(unit_id) => Ok(unit_id.clone()),
            TurnPhase::Locked => Err(Error::TurnLocked { func }),
            TurnPhase::Idle => Err(Error::NoActiveUnit { func }),
        }
    }

    fn check_active(&self, func: &'static str, unit_id: &str) -> Result<(), Error> {
        let active = self.require_active(func)?;
        if active != unit_id {
            return Err(Error::NotActiveUnit {
                func,
                unit_id: unit_id.to_string(),
            });
        }
        Ok(())
    }
}

fn logged<T>(func: &'static str, result: Result<T, Error>) -> Result<T, Error> {
    if let Err(e) = &result {
        warn!(func, error = %e, "rejected");
    }
    result
}
