// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use cron::Schedule;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::models::schedule::ScheduleSpec;
use crate::domain::models::task::ScrapingTask;
use crate::domain::repositories::config_repository::{ConfigRepository, SCHEDULES_KEY};
use crate::domain::repositories::post_history_repository::PostHistoryRepository;
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::workers::scrape_worker::ScrapeWorker;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// 无法解析的cron表达式
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },
}

/// 单次抓取发布的执行者
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, url: &str, auto_publish: bool) -> Option<ScrapingTask>;
}

#[async_trait]
impl<R, H> TaskExecutor for ScrapeWorker<R, H>
where
    R: TaskRepository + Send + Sync,
    H: PostHistoryRepository + Send + Sync,
{
    async fn execute(&self, url: &str, auto_publish: bool) -> Option<ScrapingTask> {
        ScrapeWorker::<R, H>::execute(self, url, auto_publish).await
    }
}

/// 已注册的触发器
struct ScheduledTrigger {
    /// 每次注册生成新的标识，旧循环据此判断自己是否已被替换
    generation: Uuid,
    spec: ScheduleSpec,
    handle: JoinHandle<()>,
}

type TriggerMap = Arc<Mutex<HashMap<String, ScheduledTrigger>>>;

/// 任务调度器
///
/// 按名称管理cron触发器。同名触发器重新注册时先停止旧的再替换，
/// 替换在持锁期间完成，旧触发器在 `schedule` 返回后不会再触发。
/// 停止触发器只阻止之后的触发，不会取消正在执行的任务。
pub struct TaskScheduler {
    executor: Arc<dyn TaskExecutor>,
    triggers: TriggerMap,
    /// 串行化快照与写入，较旧的快照不会覆盖较新的
    persist_lock: tokio::sync::Mutex<()>,
}

impl TaskScheduler {
    /// 创建新的任务调度器实例
    ///
    /// # 参数
    ///
    /// * `executor` - 每次触发时调用的执行者
    ///
    /// # 返回值
    ///
    /// 返回新的任务调度器实例
    pub fn new(executor: Arc<dyn TaskExecutor>) -> Self {
        Self {
            executor,
            triggers: Arc::new(Mutex::new(HashMap::new())),
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// 注册或替换一个定时任务
    ///
    /// 表达式无效时返回错误，同名的旧触发器保持运行
    ///
    /// # 参数
    ///
    /// * `spec` - 定时任务定义
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 注册成功
    /// * `Err(ScheduleError)` - 表达式无效
    pub fn schedule(&self, spec: ScheduleSpec) -> Result<(), ScheduleError> {
        let cron = parse_cron(&spec.cron_expression)?;
        let generation = Uuid::new_v4();

        let mut triggers = self.triggers.lock();
        if let Some(previous) = triggers.remove(&spec.name) {
            previous.handle.abort();
            info!("Replacing scheduled task '{}'", spec.name);
        }

        let handle = tokio::spawn(run_trigger(
            self.triggers.clone(),
            self.executor.clone(),
            spec.clone(),
            cron,
            generation,
        ));
        info!(
            "Scheduled task '{}' ({}) for {}",
            spec.name, spec.cron_expression, spec.url
        );
        triggers.insert(
            spec.name.clone(),
            ScheduledTrigger {
                generation,
                spec,
                handle,
            },
        );

        Ok(())
    }

    /// 立即执行一次抓取并发布
    pub async fn execute_scrape_and_post(
        &self,
        url: &str,
        auto_publish: bool,
    ) -> Option<ScrapingTask> {
        self.executor.execute(url, auto_publish).await
    }

    /// 停止指定名称的定时任务
    ///
    /// 名称不存在时什么也不做
    ///
    /// # 返回值
    ///
    /// 是否确实停止了一个触发器
    pub fn stop(&self, name: &str) -> bool {
        match self.triggers.lock().remove(name) {
            Some(trigger) => {
                trigger.handle.abort();
                info!("Stopped scheduled task '{}'", name);
                true
            }
            None => false,
        }
    }

    /// 停止所有定时任务
    pub fn stop_all(&self) {
        let mut triggers = self.triggers.lock();
        for (name, trigger) in triggers.drain() {
            trigger.handle.abort();
            debug!("Stopped scheduled task '{}'", name);
        }
        info!("All scheduled tasks stopped");
    }

    /// 当前活跃的定时任务名称，按名称排序
    pub fn active_tasks(&self) -> Vec<String> {
        let mut names: Vec<String> = self.triggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// 当前活跃的定时任务定义，按名称排序
    pub fn schedules(&self) -> Vec<ScheduleSpec> {
        let mut specs: Vec<ScheduleSpec> = self
            .triggers
            .lock()
            .values()
            .map(|t| t.spec.clone())
            .collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// 将活跃的定时任务保存到运行时配置
    pub async fn persist<C>(&self, config: &C) -> Result<(), RepositoryError>
    where
        C: ConfigRepository + ?Sized,
    {
        let _guard = self.persist_lock.lock().await;
        let json = serde_json::to_string(&self.schedules())?;
        config.set(SCHEDULES_KEY, &json).await
    }

    /// 从运行时配置恢复定时任务
    ///
    /// 无效条目记录日志后跳过
    ///
    /// # 返回值
    ///
    /// 成功恢复的数量
    pub async fn restore<C>(&self, config: &C) -> Result<usize, RepositoryError>
    where
        C: ConfigRepository + ?Sized,
    {
        let Some(json) = config.get(SCHEDULES_KEY).await? else {
            return Ok(0);
        };

        let specs: Vec<ScheduleSpec> = match serde_json::from_str(&json) {
            Ok(specs) => specs,
            Err(e) => {
                warn!("Ignoring unreadable saved schedules: {}", e);
                return Ok(0);
            }
        };

        let mut restored = 0;
        for spec in specs {
            let name = spec.name.clone();
            match self.schedule(spec) {
                Ok(()) => restored += 1,
                Err(e) => warn!("Skipping saved schedule '{}': {}", name, e),
            }
        }

        info!("Restored {} scheduled tasks", restored);
        Ok(restored)
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        for trigger in self.triggers.lock().values() {
            trigger.handle.abort();
        }
    }
}

async fn run_trigger(
    triggers: TriggerMap,
    executor: Arc<dyn TaskExecutor>,
    spec: ScheduleSpec,
    cron: Schedule,
    generation: Uuid,
) {
    let mut last_fire: Option<DateTime<Local>> = None;

    loop {
        let now = Local::now();
        let from = last_fire.map_or(now, |last| last.max(now));
        let Some(next) = cron.after(&from).next() else {
            warn!("Scheduled task '{}' has no upcoming fire time", spec.name);
            break;
        };

        let wait = (next - Local::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
        last_fire = Some(next);

        // Spawn under the lock so a concurrent replacement cannot slip in between the check and the fire
        let still_current = {
            let registry = triggers.lock();
            let current = registry
                .get(&spec.name)
                .is_some_and(|trigger| trigger.generation == generation);
            if current {
                debug!("Scheduled task '{}' fired", spec.name);
                let executor = executor.clone();
                let url = spec.url.clone();
                let auto_publish = spec.auto_publish;
                tokio::spawn(async move {
                    executor.execute(&url, auto_publish).await;
                });
            }
            current
        };

        if !still_current {
            break;
        }
    }
}

/// 规范化cron表达式
///
/// 5段表达式按标准crontab解释：补上秒字段 `0`，星期字段中的数字
/// （0和7为周日）换成星期名称。6/7段表达式原样使用。
pub fn normalize_cron(expression: &str) -> Result<String, ScheduleError> {
    let mut fields: Vec<String> = expression.split_whitespace().map(String::from).collect();
    if fields.len() != 5 {
        return Ok(fields.join(" "));
    }

    fields[4] = crontab_day_of_week(&fields[4]).map_err(|reason| {
        ScheduleError::InvalidExpression {
            expression: expression.to_string(),
            reason,
        }
    })?;
    Ok(format!("0 {}", fields.join(" ")))
}

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// 将crontab星期字段（0-7，周日为0或7）展开为星期名称列表
fn crontab_day_of_week(field: &str) -> Result<String, String> {
    if field == "*" || field == "?" {
        return Ok(field.to_string());
    }

    let mut days = BTreeSet::new();
    let mut named = Vec::new();
    for part in field.split(',') {
        if part.chars().any(|c| c.is_ascii_alphabetic()) {
            named.push(part.to_string());
            continue;
        }

        let (range, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step: usize = step
                    .parse()
                    .map_err(|_| format!("Invalid day-of-week step '{}'", step))?;
                if step == 0 {
                    return Err("Day-of-week step must be positive".to_string());
                }
                (range, Some(step))
            }
            None => (part, None),
        };

        let (start, end) = if range == "*" {
            (0, 6)
        } else if let Some((start, end)) = range.split_once('-') {
            (parse_day(start)?, parse_day(end)?)
        } else {
            let day = parse_day(range)?;
            (day, if step.is_some() { 6 } else { day })
        };
        if start > end {
            return Err(format!("Invalid day-of-week range '{}'", range));
        }

        for day in (start..=end).step_by(step.unwrap_or(1)) {
            days.insert(day % 7);
        }
    }

    let mut parts: Vec<String> = days.into_iter().map(|d| DAY_NAMES[d].to_string()).collect();
    parts.extend(named);
    if parts.is_empty() {
        return Err("Empty day-of-week field".to_string());
    }
    Ok(parts.join(","))
}

fn parse_day(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(day) if day <= 7 => Ok(day),
        _ => Err(format!("Day of week '{}' must be between 0 and 7", value)),
    }
}

/// 解析cron表达式
///
/// # 参数
///
/// * `expression` - 5/6/7段cron表达式
///
/// # 返回值
///
/// * `Ok(Schedule)` - 解析结果
/// * `Err(ScheduleError)` - 表达式无效
pub fn parse_cron(expression: &str) -> Result<Schedule, ScheduleError> {
    Schedule::from_str(&normalize_cron(expression)?).map_err(|e| {
        ScheduleError::InvalidExpression {
            expression: expression.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
