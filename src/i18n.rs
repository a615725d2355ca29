//! Localized strings for carmate
//!
//! Static tables, one per language – English and Traditional Chinese.
//! `get_strings(lang)` is a pure lookup; nothing here holds state.

use crate::config::Language;

pub struct Strings {
    // Sidebar
    pub nav_dashboard: &'static str,
    pub nav_maintenance: &'static str,
    pub nav_assistant: &'static str,
    pub sidebar_back: &'static str,
    pub sidebar_dim: &'static str,
    pub sidebar_install: &'static str,
    pub sidebar_exit: &'static str,

    // Dashboard
    pub dash_current_speed: &'static str,
    pub dash_gps_active: &'static str,
    pub dash_gps_searching: &'static str,
    pub dash_start_driving: &'static str,
    pub dash_google_maps: &'static str,
    pub dash_not_playing: &'static str,
    pub dash_connect_bluetooth: &'static str,
    pub dash_device: &'static str,
    pub dash_status: &'static str,
    pub dash_system: &'static str,
    pub dash_online: &'static str,
    pub dash_cloudy: &'static str,
    pub dash_temp: &'static str,
    pub dash_maps_failed: &'static str,

    // Maintenance
    pub maint_title: &'static str,
    pub maint_subtitle: &'static str,
    pub maint_note: &'static str,
    pub maint_manual_steps: &'static str,
    pub maint_adb_command: &'static str,
    pub maint_copy: &'static str,
    pub maint_view_instructions: &'static str,
    pub maint_warning: &'static str,
    pub maint_copied: &'static str,
    pub maint_copy_failed: &'static str,
    pub maint_gboard_title: &'static str,
    pub maint_gboard_desc: &'static str,
    pub maint_play_title: &'static str,
    pub maint_play_desc: &'static str,
    pub maint_maps_title: &'static str,
    pub maint_maps_desc: &'static str,
    pub danger_low: &'static str,
    pub danger_medium: &'static str,
    pub danger_high: &'static str,

    // Assistant
    pub assistant_title: &'static str,
    pub assistant_subtitle: &'static str,
    pub assistant_placeholder: &'static str,
    pub assistant_greeting: &'static str,
    pub assistant_thinking: &'static str,
    pub assistant_you: &'static str,
    pub assistant_bot: &'static str,
    pub assistant_suggestions: [&'static str; 4],

    // AI client fallbacks
    pub ai_missing_key: &'static str,
    pub ai_error: &'static str,
    pub ai_empty: &'static str,

    // Dimmer
    pub dim_title: &'static str,
    pub dim_off: &'static str,
    pub dim_wake_hint: &'static str,

    // Install prompt
    pub install_done: &'static str,
    pub install_failed: &'static str,

    // Settings
    pub settings_title: &'static str,
    pub settings_theme: &'static str,
    pub settings_language: &'static str,
    pub settings_api_key: &'static str,
    pub settings_key_set: &'static str,
    pub settings_key_unset: &'static str,
    pub settings_key_env: &'static str,
    pub settings_saved: &'static str,
    pub save_failed: &'static str,
    pub settings_hint: &'static str,
    pub settings_edit_hint: &'static str,

    // Help
    pub help_title: &'static str,
    pub help_body: &'static str,

    // Status bar
    pub hint_global: &'static str,
}

static EN: Strings = Strings {
    nav_dashboard: "Dash",
    nav_maintenance: "Tools",
    nav_assistant: "AI Pilot",
    sidebar_back: "Back",
    sidebar_dim: "Dim",
    sidebar_install: "Install",
    sidebar_exit: "Exit",

    dash_current_speed: "Current Speed",
    dash_gps_active: "GPS Active",
    dash_gps_searching: "Searching GPS...",
    dash_start_driving: "Start Driving",
    dash_google_maps: "Google Maps",
    dash_not_playing: "Not Playing",
    dash_connect_bluetooth: "Connect Bluetooth Audio",
    dash_device: "Device",
    dash_status: "Status",
    dash_system: "System",
    dash_online: "Online",
    dash_cloudy: "Cloudy",
    dash_temp: "24°C",
    dash_maps_failed: "Could not open Google Maps",

    maint_title: "System Maintenance",
    maint_subtitle: "Manual troubleshooting guides and ADB commands.",
    maint_note: "Note: the shell cannot execute these directly. Use ADB.",
    maint_manual_steps: "Manual Steps",
    maint_adb_command: "ADB Command",
    maint_copy: "Copy Command",
    maint_view_instructions: "View Instructions",
    maint_warning: "Warning: Clearing this data may require re-login.",
    maint_copied: "Command copied to clipboard",
    maint_copy_failed: "Clipboard unavailable",
    maint_gboard_title: "Fix Gboard Lag",
    maint_gboard_desc: "Clears storage and cache for the Google Keyboard app.",
    maint_play_title: "Reset Play Services",
    maint_play_desc: "Fixes download issues or login loops.",
    maint_maps_title: "Reset Google Maps",
    maint_maps_desc: "Clears local map data to fix navigation glitches.",
    danger_low: "low risk",
    danger_medium: "medium risk",
    danger_high: "high risk",

    assistant_title: "AI Co-Pilot",
    assistant_subtitle: "Ask about app recommendations or technical support.",
    assistant_placeholder: "Ask me anything about your car setup...",
    assistant_greeting: "Hello! I'm your car Co-Pilot. I can recommend apps or help troubleshoot.",
    assistant_thinking: "Thinking...",
    assistant_you: "You",
    assistant_bot: "Co-Pilot",
    assistant_suggestions: [
        "Suggest Music Apps",
        "Clear Cache Command",
        "Fix GPS",
        "Head Unit Settings",
    ],

    ai_missing_key: "API Key is missing. Please check your configuration.",
    ai_error: "Sorry, I encountered an error communicating with the AI service.",
    ai_empty: "I couldn't generate a response.",

    dim_title: "Brightness",
    dim_off: "OFF",
    dim_wake_hint: "Press any key to wake",

    install_done: "Launcher entry installed",
    install_failed: "Could not install launcher entry",

    settings_title: "Settings",
    settings_theme: "Theme",
    settings_language: "Language",
    settings_api_key: "Gemini API Key",
    settings_key_set: "(set)",
    settings_key_unset: "(not set)",
    settings_key_env: "(from environment)",
    settings_saved: "Settings saved",
    save_failed: "Save failed",
    settings_hint: "j/k select · Enter change · Esc close",
    settings_edit_hint: "Enter save · Esc cancel",

    help_title: "Help / About",
    help_body: "carmate is an infotainment shell for in-car Linux head units.\n\n\
        [1] Dash         Speed, clock and weather widgets\n\
        [2] Tools        Maintenance guides with ADB commands\n\
        [3] AI Pilot     Chat assistant for your car setup\n\n\
        Backspace goes back to the previous view. The brightness menu (b)\n\
        dims the screen; at OFF any key wakes it again.\n\n\
        The AI Pilot needs a Gemini API key, read from GEMINI_API_KEY or\n\
        the settings page.",

    hint_global: "1-3 views · Bksp back · b dim · g lang · , settings · ? help · q quit",
};

static ZH: Strings = Strings {
    nav_dashboard: "儀表板",
    nav_maintenance: "維護",
    nav_assistant: "AI 助手",
    sidebar_back: "返回",
    sidebar_dim: "亮度",
    sidebar_install: "安裝",
    sidebar_exit: "離開",

    dash_current_speed: "目前時速",
    dash_gps_active: "GPS 已連線",
    dash_gps_searching: "搜尋 GPS 中...",
    dash_start_driving: "開始導航",
    dash_google_maps: "Google 地圖",
    dash_not_playing: "未播放",
    dash_connect_bluetooth: "請連接藍牙音訊",
    dash_device: "裝置",
    dash_status: "狀態",
    dash_system: "系統",
    dash_online: "線上",
    dash_cloudy: "多雲",
    dash_temp: "24°C",
    dash_maps_failed: "無法開啟 Google 地圖",

    maint_title: "系統維護",
    maint_subtitle: "車機的手動故障排除指南與 ADB 指令。",
    maint_note: "注意：本程式無法直接執行指令，請使用 ADB。",
    maint_manual_steps: "手動步驟",
    maint_adb_command: "ADB 指令",
    maint_copy: "複製指令",
    maint_view_instructions: "查看教學",
    maint_warning: "警告：清除此資料可能需要重新登入您的 Google 帳戶。",
    maint_copied: "指令已複製到剪貼簿",
    maint_copy_failed: "無法使用剪貼簿",
    maint_gboard_title: "修復鍵盤卡頓",
    maint_gboard_desc: "清除 Google Gboard 鍵盤的儲存空間與快取。",
    maint_play_title: "重設 Play 服務",
    maint_play_desc: "修復下載問題或登入迴圈。",
    maint_maps_title: "重設 Google 地圖",
    maint_maps_desc: "清除地圖快取以修復導航錯誤。",
    danger_low: "低風險",
    danger_medium: "中風險",
    danger_high: "高風險",

    assistant_title: "AI 駕駛助手",
    assistant_subtitle: "詢問推薦應用程式或技術支援。",
    assistant_placeholder: "詢問關於您的車機設定...",
    assistant_greeting: "你好！我是你的駕駛助手。我可以推薦好用的 APP 或協助排除故障。",
    assistant_thinking: "思考中...",
    assistant_you: "你",
    assistant_bot: "助手",
    assistant_suggestions: ["推薦音樂 APP", "清除快取指令", "修復 GPS", "車機設定"],

    ai_missing_key: "缺少 API Key，請檢查設定。",
    ai_error: "抱歉，與 AI 服務連線時發生錯誤。",
    ai_empty: "無法產生回應。",

    dim_title: "亮度",
    dim_off: "關閉",
    dim_wake_hint: "按任意鍵喚醒",

    install_done: "已安裝啟動器項目",
    install_failed: "無法安裝啟動器項目",

    settings_title: "設定",
    settings_theme: "主題",
    settings_language: "語言",
    settings_api_key: "Gemini API Key",
    settings_key_set: "（已設定）",
    settings_key_unset: "（未設定）",
    settings_key_env: "（來自環境變數）",
    settings_saved: "設定已儲存",
    save_failed: "儲存失敗",
    settings_hint: "j/k 選擇 · Enter 變更 · Esc 關閉",
    settings_edit_hint: "Enter 儲存 · Esc 取消",

    help_title: "說明 / 關於",
    help_body: "carmate 是車用 Linux 車機的資訊娛樂介面。\n\n\
        [1] 儀表板       時速、時鐘與天氣小工具\n\
        [2] 維護         含 ADB 指令的維護指南\n\
        [3] AI 助手      車機設定聊天助手\n\n\
        Backspace 返回上一個畫面。亮度選單（b）可調暗螢幕；\n\
        關閉後按任意鍵喚醒。\n\n\
        AI 助手需要 Gemini API Key，可由 GEMINI_API_KEY 環境變數\n\
        或設定頁提供。",

    hint_global: "1-3 畫面 · Bksp 返回 · b 亮度 · g 語言 · , 設定 · ? 說明 · q 離開",
};

/// Look up the string table for a language
pub fn get_strings(lang: Language) -> &'static Strings {
    match lang {
        Language::English => &EN,
        Language::Chinese => &ZH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_language_specific() {
        assert_eq!(get_strings(Language::English).nav_assistant, "AI Pilot");
        assert_eq!(get_strings(Language::Chinese).nav_assistant, "AI 助手");
    }

    #[test]
    fn test_greetings_differ_per_language() {
        let en = get_strings(Language::English).assistant_greeting;
        let zh = get_strings(Language::Chinese).assistant_greeting;
        assert_ne!(en, zh);
        assert!(!en.is_empty());
        assert!(!zh.is_empty());
    }

    #[test]
    fn test_suggestion_rows_are_filled() {
        for lang in [Language::English, Language::Chinese] {
            for s in get_strings(lang).assistant_suggestions {
                assert!(!s.trim().is_empty());
            }
        }
    }

}
