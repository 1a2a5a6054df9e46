/// Org preferences read from `OrgPreferenceSettings.Metadata.preferences`.
pub const ORG_PREFERENCES: &[&str] = &[
    "AnalyticsSharingEnable",
    "AsyncSaveEnabled",
    "ChatterEnabled",
    "DisableParallelApexTesting",
    "EnhancedEmailEnabled",
    "EventLogWaveIntegEnabled",
    "LoginForensicsEnabled",
    "NetworksEnabled",
    "OfflineDraftsEnabled",
    "PathAssistantsEnabled",
    "S1DesktopEnabled",
    "S1EncryptedStoragePref2",
    "S1OfflinePref",
    "SelfSetPasswordInApi",
    "SendThroughGmailPref",
    "SocialProfilesEnable",
    "Translation",
    "VoiceEnabled",
];

/// A settings metadata object and how its fields map to scratch org
/// preferences: `(preference, metadata field)`.
#[derive(Debug)]
pub struct SettingsTable {
    pub object: &'static str,
    pub preferences: &'static [(&'static str, &'static str)],
}

impl SettingsTable {
    pub fn query(&self) -> String {
        format!("SELECT Metadata FROM {}", self.object)
    }
}

pub const SETTINGS_TABLES: &[SettingsTable] = &[
    SettingsTable {
        object: "AccountSettings",
        preferences: &[
            ("IsAccountTeamsEnabled", "enableAccountTeams"),
            ("ShowViewHierarchyLink", "showViewHierarchyLink"),
        ],
    },
    SettingsTable {
        object: "ActivitiesSettings",
        preferences: &[
            ("IsActivityRemindersEnabled", "enableActivityReminders"),
            ("IsDragAndDropSchedulingEnabled", "enableDragAndDropScheduling"),
            ("IsEmailTrackingEnabled", "enableEmailTracking"),
            ("IsGroupTasksEnabled", "enableGroupTasks"),
            ("IsMultidayEventsEnabled", "enableMultidayEvents"),
            ("IsRecurringEventsEnabled", "enableRecurringEvents"),
            ("IsRecurringTasksEnabled", "enableRecurringTasks"),
            ("IsSidebarCalendarShortcutEnabled", "enableSidebarCalendarShortcut"),
            ("IsSimpleTaskCreateUiEnabled", "enableSimpleTaskCreateUI"),
            ("ShowEventDetailsMultiUserCalendar", "showEventDetailsMultiUserCalendar"),
            ("ShowHomePageHoverLinksForEvents", "showHomePageHoverLinksForEvents"),
            ("ShowMyTasksHoverLinks", "showMyTasksHoverLinks"),
        ],
    },
    SettingsTable {
        object: "ContractSettings",
        preferences: &[
            ("AutoCalculateEndDate", "autoCalculateEndDate"),
            ("IsContractHistoryTrackingEnabled", "enableContractHistoryTracking"),
            ("NotifyOwnersOnContractExpiration", "notifyOwnersOnContractExpiration"),
        ],
    },
    SettingsTable {
        object: "EntitlementSettings",
        preferences: &[
            (
                "AssetLookupLimitedToActiveEntitlementsOnAccount",
                "assetLookupLimitedToActiveEntitlementsOnAccount",
            ),
            (
                "AssetLookupLimitedToActiveEntitlementsOnContact",
                "assetLookupLimitedToActiveEntitlementsOnContact",
            ),
            ("AssetLookupLimitedToSameAccount", "assetLookupLimitedToSameAccount"),
            ("AssetLookupLimitedToSameContact", "assetLookupLimitedToSameContact"),
            ("IsEntitlementsEnabled", "enableEntitlements"),
            (
                "EntitlementLookupLimitedToActiveStatus",
                "entitlementLookupLimitedToActiveStatus",
            ),
            (
                "EntitlementLookupLimitedToSameAccount",
                "entitlementLookupLimitedToSameAccount",
            ),
            (
                "EntitlementLookupLimitedToSameAsset",
                "entitlementLookupLimitedToSameAsset",
            ),
            (
                "EntitlementLookupLimitedToSameContact",
                "entitlementLookupLimitedToSameContact",
            ),
        ],
    },
    SettingsTable {
        object: "ForecastingSettings",
        preferences: &[("IsForecastsEnabled", "enableForecasts")],
    },
    SettingsTable {
        object: "IdeasSettings",
        preferences: &[
            ("IsChatterProfileEnabled", "enableChatterProfile"),
            ("IsIdeaThemesEnabled", "enableIdeaThemes"),
            ("IsIdeasEnabled", "enableIdeas"),
            ("IsIdeasReputationEnabled", "enableIdeasReputation"),
        ],
    },
    SettingsTable {
        object: "KnowledgeSettings",
        preferences: &[
            ("IsCreateEditOnArticlesTabEnabled", "enableCreateEditOnArticlesTab"),
            ("IsExternalMediaContentEnabled", "enableExternalMediaContent"),
            ("IsKnowledgeEnabled", "enableKnowledge"),
            ("ShowArticleSummariesCustomerPortal", "showArticleSummariesCustomerPortal"),
            ("ShowArticleSummariesInternalApp", "showArticleSummariesInternalApp"),
            ("ShowArticleSummariesPartnerPortal", "showArticleSummariesPartnerPortal"),
            ("ShowValidationStatusField", "showValidationStatusField"),
        ],
    },
    SettingsTable {
        object: "LiveAgentSettings",
        preferences: &[("IsLiveAgentEnabled", "enableLiveAgent")],
    },
    SettingsTable {
        object: "MarketingActionSettings",
        preferences: &[("IsMarketingActionEnabled", "enableMarketingAction")],
    },
    SettingsTable {
        object: "NameSettings",
        preferences: &[
            ("IsMiddleNameEnabled", "enableMiddleName"),
            ("IsNameSuffixEnabled", "enableNameSuffix"),
        ],
    },
    SettingsTable {
        object: "OpportunitySettings",
        preferences: &[("IsOpportunityTeamEnabled", "enableOpportunityTeam")],
    },
    SettingsTable {
        object: "OrderSettings",
        preferences: &[
            ("IsNegativeQuantityEnabled", "enableNegativeQuantity"),
            ("IsOrdersEnabled", "enableOrders"),
            ("IsReductionOrdersEnabled", "enableReductionOrders"),
        ],
    },
    SettingsTable {
        object: "PersonalJourneySettings",
        preferences: &[(
            "IsExactTargetForSalesforceAppsEnabled",
            "enableExactTargetForSalesforceApps",
        )],
    },
    SettingsTable {
        object: "ProductSettings",
        preferences: &[
            (
                "IsCascadeActivateToRelatedPricesEnabled",
                "enableCascadeActivateToRelatedPrices",
            ),
            ("IsQuantityScheduleEnabled", "enableQuantitySchedule"),
            ("IsRevenueScheduleEnabled", "enableRevenueSchedule"),
        ],
    },
    SettingsTable {
        object: "QuoteSettings",
        preferences: &[("IsQuoteEnabled", "enableQuote")],
    },
    SettingsTable {
        object: "SearchSettings",
        preferences: &[
            ("DocumentContentSearchEnabled", "documentContentSearchEnabled"),
            ("OptimizeSearchForCjkEnabled", "optimizeSearchForCJKEnabled"),
            (
                "RecentlyViewedUsersForBlankLookupEnabled",
                "recentlyViewedUsersForBlankLookupEnabled",
            ),
            ("SidebarAutoCompleteEnabled", "sidebarAutoCompleteEnabled"),
            ("SidebarDropDownListEnabled", "sidebarDropDownListEnabled"),
            (
                "SidebarLimitToItemsIownCheckboxEnabled",
                "sidebarLimitToItemsIOwnCheckboxEnabled",
            ),
            ("SingleSearchResultShortcutEnabled", "singleSearchResultShortcutEnabled"),
            ("SpellCorrectKnowledgeSearchEnabled", "spellCorrectKnowledgeSearchEnabled"),
        ],
    },
];
