// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 抓取任务实体
///
/// 记录一次"抓取并发布"尝试及其结果。任务一旦进入终态便不再重新打开，
/// 重试总是创建一条新的任务记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingTask {
    /// 任务ID，由存储层自增分配
    pub id: i32,
    /// 目标URL
    pub url: String,
    /// 任务状态
    pub status: TaskStatus,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 完成时间，仅在进入终态时设置
    pub completed_at: Option<DateTime<Utc>>,
    /// 失败原因
    pub error_message: Option<String>,
}

/// 任务状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Processing → Completed/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 已创建，尚未开始
    #[default]
    Pending,
    /// 抓取或发布进行中
    Processing,
    /// 已成功完成
    Completed,
    /// 已失败
    Failed,
}

impl TaskStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// 判断是否允许转换到目标状态
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Processing)
                | (TaskStatus::Processing, TaskStatus::Completed)
                | (TaskStatus::Processing, TaskStatus::Failed)
                // A run that blows up before reaching processing still has to end somewhere
                | (TaskStatus::Pending, TaskStatus::Failed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "processing" => Ok(TaskStatus::Processing),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: TaskStatus, to: TaskStatus },
}

impl ScrapingTask {
    fn transition(mut self, next: TaskStatus) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if next.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(self)
    }

    /// 启动任务
    ///
    /// 将任务状态从Pending变更为Processing
    pub fn start(self) -> Result<Self, DomainError> {
        self.transition(TaskStatus::Processing)
    }

    /// 完成任务
    ///
    /// 将任务状态从Processing变更为Completed
    pub fn complete(self) -> Result<Self, DomainError> {
        self.transition(TaskStatus::Completed)
    }

    /// 标记任务失败
    ///
    /// # 参数
    ///
    /// * `error_message` - 失败原因
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapingTask)` - 失败的任务
    /// * `Err(DomainError)` - 状态转换失败
    pub fn fail(self, error_message: impl Into<String>) -> Result<Self, DomainError> {
        let mut task = self.transition(TaskStatus::Failed)?;
        task.error_message = Some(error_message.into());
        Ok(task)
    }
}
